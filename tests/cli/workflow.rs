//! Tests for `dockstore workflow` commands.

use super::*;

static HELLO_WORKFLOW: &str = "github.com/DockstoreTestUser2/hello-dockstore-workflow";

/// Tests refreshing a workflow from the GitHub simulation.
///
/// Verifies each branch and tag becomes a version, versions without the
/// descriptor are invalid, and the App installation id is recorded.
///
/// Expected: Ok with three versions, two of them valid
#[tokio::test]
async fn refresh_workflow_from_github() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_github_repository(hello_dockstore_workflow(), 1)
        .build()
        .await?;

    test.cli
        .run_expect(&["workflow", "refresh", "--entry", HELLO_WORKFLOW], ExitCode::Success)
        .await?;

    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM workflowversion WHERE workflow_id = 1")
            .await?,
        3
    );
    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM workflowversion WHERE workflow_id = 1 AND valid")
            .await?,
        2
    );
    assert_eq!(
        test.count(
            "SELECT COUNT(*) AS count FROM workflow \
             WHERE id = 1 AND github_app_installation_id = 1179416 AND last_refreshed IS NOT NULL"
        )
        .await?,
        1
    );
    assert_eq!(
        test.count(
            "SELECT COUNT(*) AS count FROM sourcefile s \
             JOIN workflowversion v ON s.parent_id = v.id \
             WHERE s.parent_type = 'workflowversion' AND v.workflow_id = 1"
        )
        .await?,
        2
    );

    let stdout = test.cli.output.stdout();
    assert!(stdout.contains("wdl-only"));
    assert!(stdout.contains("1.0"));

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}

/// Tests that a refresh reaching an unsimulated GitHub endpoint fails.
///
/// The simulation answers every unmatched request with 501, which the
/// webservice reports as an upstream failure.
///
/// Expected: Ok with API_ERROR and the seeded version untouched
#[tokio::test]
async fn refresh_without_simulation_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(&["workflow", "refresh", "--entry", HELLO_WORKFLOW], ExitCode::ApiError)
        .await?;

    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM workflowversion WHERE workflow_id = 1")
            .await?,
        1
    );

    test.assert_no_leaked_connections().await
}

/// Tests publishing and unpublishing a workflow.
///
/// Expected: Ok with SUCCESS for each change and COMMAND_ERROR for repeats
#[tokio::test]
async fn publish_and_unpublish_workflow() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let published = "SELECT COUNT(*) AS count FROM workflow WHERE id = 1 AND is_published";

    test.cli
        .run_expect(&["workflow", "publish", "--entry", HELLO_WORKFLOW], ExitCode::Success)
        .await?;
    assert_eq!(test.count(published).await?, 1);

    test.cli
        .run_expect(
            &["workflow", "publish", "--entry", HELLO_WORKFLOW],
            ExitCode::CommandError,
        )
        .await?;

    test.cli
        .run_expect(
            &["workflow", "publish", "--entry", HELLO_WORKFLOW, "--unpub"],
            ExitCode::Success,
        )
        .await?;
    assert_eq!(test.count(published).await?, 0);

    test.assert_no_leaked_connections().await
}

/// Tests publishing a workflow that was never refreshed.
///
/// Expected: Ok with API_ERROR
#[tokio::test]
async fn publish_workflow_without_versions_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_fixture_set(FixtureSet::Confidential2)
        .build()
        .await?;

    test.cli
        .run_expect(
            &[
                "workflow",
                "publish",
                "--entry",
                "github.com/DockstoreTestUser2/dockstore_workflow_cnv",
            ],
            ExitCode::ApiError,
        )
        .await?;

    test.assert_no_leaked_connections().await
}

/// Tests `workflow info` and `workflow list`.
///
/// Expected: Ok with the published workflow's details and all of the user's workflows
#[tokio::test]
async fn info_and_list_workflows() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(
            &[
                "workflow",
                "info",
                "--entry",
                "github.com/DockstoreTestUser2/dockstore-whalesay-imports",
            ],
            ExitCode::Success,
        )
        .await?;
    assert!(test
        .cli
        .output
        .stdout()
        .contains("WORKFLOW: github.com/DockstoreTestUser2/dockstore-whalesay-imports"));

    test.cli
        .run_expect(&["workflow", "info", "--entry", HELLO_WORKFLOW], ExitCode::EntryNotFound)
        .await?;

    test.cli.output.clear();
    test.cli
        .run_expect(&["workflow", "list"], ExitCode::Success)
        .await?;
    let stdout = test.cli.output.stdout();
    assert!(stdout.contains("hello-dockstore-workflow"));
    assert!(stdout.contains("dockstore-whalesay-imports"));

    Ok(())
}
