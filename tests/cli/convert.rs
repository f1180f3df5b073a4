//! Tests for `dockstore convert`.

use serde_json::json;

use super::*;

static WORKFLOW_CWL: &str = "cwlVersion: v1.0\n\
                             class: Workflow\n\
                             inputs:\n  \
                               - id: input_file\n    type: File\n  \
                               - id: verbose\n    type: boolean\n\
                             outputs: []\n\
                             steps: []\n";

/// Tests converting a local CWL descriptor to a JSON parameter template.
///
/// Expected: Ok with a placeholder for every input
#[tokio::test]
async fn cwl2json_prints_template() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let cwl = test.cli.write_file("workflow.cwl", WORKFLOW_CWL)?;

    test.cli
        .run_expect(
            &["convert", "cwl2json", "--cwl", &cwl.display().to_string()],
            ExitCode::Success,
        )
        .await?;

    let template: serde_json::Value = serde_json::from_str(&test.cli.output.stdout())?;
    assert_eq!(
        template,
        json!({
            "input_file": { "class": "File", "path": "/tmp/fill_me_in.txt" },
            "verbose": false,
        })
    );

    Ok(())
}

/// Tests converting a local CWL descriptor to YAML.
///
/// Expected: Ok with the same template rendered as YAML
#[tokio::test]
async fn cwl2yaml_prints_template() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let cwl = test.cli.write_file("workflow.cwl", WORKFLOW_CWL)?;

    test.cli
        .run_expect(
            &["convert", "cwl2yaml", "--cwl", &cwl.display().to_string()],
            ExitCode::Success,
        )
        .await?;

    let stdout = test.cli.output.stdout();
    assert!(stdout.contains("verbose: false"));
    assert!(stdout.contains("path: /tmp/fill_me_in.txt"));

    Ok(())
}

/// Tests converting a file that does not exist.
///
/// Expected: Ok with ENTRY_NOT_FOUND
#[tokio::test]
async fn convert_missing_file_is_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let missing = test.cli.work_dir().join("missing.cwl");

    test.cli
        .run_expect(
            &["convert", "cwl2json", "--cwl", &missing.display().to_string()],
            ExitCode::EntryNotFound,
        )
        .await?;

    Ok(())
}

/// Tests converting a document without `cwlVersion`.
///
/// Expected: Ok with COMMAND_ERROR
#[tokio::test]
async fn convert_non_cwl_document_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let cwl = test.cli.write_file("notcwl.cwl", "class: Workflow\ninputs: {}\n")?;

    test.cli
        .run_expect(
            &["convert", "cwl2json", "--cwl", &cwl.display().to_string()],
            ExitCode::CommandError,
        )
        .await?;

    Ok(())
}

/// Tests that local conversion needs no config file.
///
/// Expected: SUCCESS even though the config file does not exist
#[tokio::test]
async fn local_convert_ignores_missing_config() -> Result<(), TestError> {
    let dir = tempfile::tempdir()?;
    let cwl = dir.path().join("workflow.cwl");
    std::fs::write(&cwl, WORKFLOW_CWL)?;
    let missing_config = dir.path().join("no-config");

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = dockstore::cli::run(
        [
            "dockstore".to_string(),
            "--config".to_string(),
            missing_config.display().to_string(),
            "convert".to_string(),
            "cwl2json".to_string(),
            "--cwl".to_string(),
            cwl.display().to_string(),
        ],
        &mut stdout,
        &mut stderr,
    )
    .await;

    assert_eq!(code, ExitCode::Success.code());
    assert!(String::from_utf8_lossy(&stdout).contains("input_file"));

    Ok(())
}

/// Tests building a template from a registered tool's descriptor.
///
/// Expected: Ok with a template for the seeded cowsay tool
#[tokio::test]
async fn entry2json_uses_remote_descriptor() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(
            &[
                "convert",
                "entry2json",
                "--entry",
                "quay.io/dockstoretestuser/quayandgithub:master",
            ],
            ExitCode::Success,
        )
        .await?;

    let template: serde_json::Value = serde_json::from_str(&test.cli.output.stdout())?;
    assert_eq!(template, json!({ "message": "fill me in", "repeat": 0 }));

    test.assert_no_leaked_connections().await
}
