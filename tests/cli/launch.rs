//! Tests for `tool launch` and `workflow launch`.

use super::*;

static TOOL_CWL: &str = "cwlVersion: v1.0\n\
                         class: CommandLineTool\n\
                         baseCommand: echo\n\
                         inputs:\n  \
                           message:\n    type: string\n\
                         outputs: []\n";

/// Tests launching a local descriptor that does not exist.
///
/// Expected: Ok with ENTRY_NOT_FOUND
#[tokio::test]
async fn missing_local_entry_is_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let params = test.cli.write_file("params.json", r#"{"message": "hi"}"#)?;
    let missing = test.cli.work_dir().join("missing.cwl");

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--local-entry",
                &missing.display().to_string(),
                "--json",
                &params.display().to_string(),
            ],
            ExitCode::EntryNotFound,
        )
        .await?;

    Ok(())
}

/// Tests launching with a parameter file that does not exist.
///
/// Expected: Ok with IO_ERROR
#[tokio::test]
async fn missing_parameter_file_is_io_error() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let descriptor = test.cli.write_file("tool.cwl", TOOL_CWL)?;
    let missing = test.cli.work_dir().join("missing.json");

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--local-entry",
                &descriptor.display().to_string(),
                "--json",
                &missing.display().to_string(),
            ],
            ExitCode::IoError,
        )
        .await?;

    Ok(())
}

/// Tests launching with a parameter file that is neither JSON nor YAML.
///
/// Expected: Ok with CLIENT_ERROR
#[tokio::test]
async fn malformed_parameter_file_is_client_error() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let descriptor = test.cli.write_file("tool.cwl", TOOL_CWL)?;
    let params = test.cli.write_file("params.json", "{\"message\": [unclosed")?;

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--local-entry",
                &descriptor.display().to_string(),
                "--json",
                &params.display().to_string(),
            ],
            ExitCode::ClientError,
        )
        .await?;

    Ok(())
}

/// Tests launching a registered tool version that has no stored descriptor.
///
/// Expected: Ok with IO_ERROR
#[tokio::test]
async fn remote_entry_without_descriptor_is_io_error() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let params = test.cli.write_file("params.json", r#"{"message": "hi"}"#)?;

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--entry",
                "quay.io/dockstoretestuser/manualtool:latest",
                "--json",
                &params.display().to_string(),
            ],
            ExitCode::IoError,
        )
        .await?;

    test.assert_no_leaked_connections().await
}

/// Tests launching unknown entries and versions.
///
/// Expected: Ok with ENTRY_NOT_FOUND for an unknown tool, an unknown version
/// and a workflow without versions
#[tokio::test]
async fn unknown_remote_entry_is_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_fixture_set(FixtureSet::Confidential2)
        .build()
        .await?;
    let params = test.cli.write_file("params.json", r#"{"message": "hi"}"#)?;
    let params = params.display().to_string();

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--entry",
                "quay.io/dockstoretestuser/doesnotexist",
                "--json",
                &params,
            ],
            ExitCode::EntryNotFound,
        )
        .await?;

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--entry",
                "quay.io/dockstoretestuser/quayandgithub:nosuchtag",
                "--json",
                &params,
            ],
            ExitCode::EntryNotFound,
        )
        .await?;

    test.cli
        .run_expect(
            &[
                "workflow",
                "launch",
                "--entry",
                "github.com/DockstoreTestUser2/dockstore_workflow_cnv",
                "--json",
                &params,
            ],
            ExitCode::EntryNotFound,
        )
        .await?;

    test.assert_no_leaked_connections().await
}

/// Tests that `--entry` and `--local-entry` are mutually exclusive.
///
/// Expected: Ok with CLIENT_ERROR from argument parsing
#[tokio::test]
async fn entry_and_local_entry_conflict() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--entry",
                "quay.io/dockstoretestuser/quayandgithub",
                "--local-entry",
                "tool.cwl",
                "--json",
                "params.json",
            ],
            ExitCode::ClientError,
        )
        .await?;

    Ok(())
}

/// Tests a local launch with `echo` standing in for cwltool.
///
/// Expected: Ok with SUCCESS and the runner's arguments echoed to stdout
#[cfg(unix)]
#[tokio::test]
async fn local_launch_runs_configured_runner() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.cli.settings.cwl_runner = Some("echo".to_string());
    test.cli.settings.singularity = true;
    let descriptor = test.cli.write_file("tool.cwl", TOOL_CWL)?;
    let params = test.cli.write_file("params.yaml", "message: hi\n")?;

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--local-entry",
                &descriptor.display().to_string(),
                "--yaml",
                &params.display().to_string(),
            ],
            ExitCode::Success,
        )
        .await?;

    assert_eq!(
        test.cli.output.stdout().trim(),
        format!("--singularity {} {}", descriptor.display(), params.display())
    );

    Ok(())
}

/// Tests a remote workflow launch, including webhook notifications.
///
/// Expected: Ok with SUCCESS, the downloaded descriptor passed to the runner
/// and both notifications delivered
#[cfg(unix)]
#[tokio::test]
async fn remote_launch_notifies_webhook() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    let mut webhook = mockito::Server::new_async().await;
    let launching = webhook
        .mock("POST", "/hook")
        .match_body(mockito::Matcher::Regex("Launching github.com/DockstoreTestUser2/dockstore-whalesay-imports:master".to_string()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let finished = webhook
        .mock("POST", "/hook")
        .match_body(mockito::Matcher::Regex("Finished".to_string()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    test.cli.settings.cwl_runner = Some("echo".to_string());
    test.cli.settings.webhook_url = Some(format!("{}/hook", webhook.url()));
    let params = test.cli.write_file("params.json", r#"{"verbose": true}"#)?;

    test.cli
        .run_expect(
            &[
                "workflow",
                "launch",
                "--entry",
                "github.com/DockstoreTestUser2/dockstore-whalesay-imports:master",
                "--json",
                &params.display().to_string(),
            ],
            ExitCode::Success,
        )
        .await?;

    assert!(test.cli.output.stdout().contains("Dockstore.cwl"));
    launching.assert_async().await;
    finished.assert_async().await;

    test.assert_no_leaked_connections().await
}

/// Tests that a failing runner is reported as a generic error.
///
/// Expected: Ok with GENERIC_ERROR
#[cfg(unix)]
#[tokio::test]
async fn failing_runner_is_generic_error() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.cli.settings.cwl_runner = Some("false".to_string());
    let descriptor = test.cli.write_file("tool.cwl", TOOL_CWL)?;
    let params = test.cli.write_file("params.json", r#"{"message": "hi"}"#)?;

    test.cli
        .run_expect(
            &[
                "tool",
                "launch",
                "--local-entry",
                &descriptor.display().to_string(),
                "--json",
                &params.display().to_string(),
            ],
            ExitCode::GenericError,
        )
        .await?;

    Ok(())
}
