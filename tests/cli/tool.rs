//! Tests for `dockstore tool` commands.

use mockito::Matcher;

use super::*;

static QUAY_AND_GITHUB: &str = "quay.io/dockstoretestuser/quayandgithub";
static MANUAL_TOOL: &str = "quay.io/dockstoretestuser/manualtool";

/// Tests publishing and then unpublishing a tool.
///
/// Verifies the published flag follows each command and that repeating either
/// command is rejected without touching the database.
///
/// Expected: Ok with SUCCESS then COMMAND_ERROR for each direction
#[tokio::test]
async fn publish_and_unpublish_tool() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let published = "SELECT COUNT(*) AS count FROM tool WHERE name = 'quayandgithub' AND is_published";

    assert_eq!(test.count(published).await?, 0);

    test.cli
        .run_expect(&["tool", "publish", "--entry", QUAY_AND_GITHUB], ExitCode::Success)
        .await?;
    assert_eq!(test.count(published).await?, 1);
    assert!(test
        .cli
        .output
        .stdout()
        .contains("Successfully published quay.io/dockstoretestuser/quayandgithub"));

    test.cli
        .run_expect(&["tool", "publish", "--entry", QUAY_AND_GITHUB], ExitCode::CommandError)
        .await?;
    assert_eq!(test.count(published).await?, 1);

    test.cli
        .run_expect(
            &["tool", "publish", "--entry", QUAY_AND_GITHUB, "--unpub"],
            ExitCode::Success,
        )
        .await?;
    assert_eq!(test.count(published).await?, 0);

    test.cli
        .run_expect(
            &["tool", "publish", "--entry", QUAY_AND_GITHUB, "--unpub"],
            ExitCode::CommandError,
        )
        .await?;
    assert_eq!(test.count(published).await?, 0);

    test.assert_no_leaked_connections().await
}

/// Tests publishing a tool that has no tags.
///
/// Expected: Ok with API_ERROR and the tool left unpublished
#[tokio::test]
async fn publish_tool_without_tags_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_fixture_set(FixtureSet::Confidential1)
        .build()
        .await?;

    test.cli
        .run_expect(
            &["tool", "publish", "--entry", "quay.io/dockstoretestuser/noautobuild"],
            ExitCode::ApiError,
        )
        .await?;

    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM tool WHERE name = 'noautobuild' AND is_published")
            .await?,
        0
    );

    test.assert_no_leaked_connections().await
}

/// Tests that another user's unpublished tool cannot be found.
///
/// Expected: Ok with ENTRY_NOT_FOUND
#[tokio::test]
async fn publish_other_users_tool_is_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_cli_token(Some(USER2_TOKEN))
        .build()
        .await?;

    test.cli
        .run_expect(
            &["tool", "publish", "--entry", QUAY_AND_GITHUB],
            ExitCode::EntryNotFound,
        )
        .await?;

    test.assert_no_leaked_connections().await
}

/// Tests adding and removing a tag on a manually registered tool.
///
/// Expected: Ok with one `masterTest` tag after adding and none after removing
#[tokio::test]
async fn add_and_remove_version_tag() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let tags = "SELECT COUNT(*) AS count FROM tag WHERE name = 'masterTest'";

    test.cli
        .run_expect(
            &[
                "tool",
                "version_tag",
                "add",
                "--entry",
                MANUAL_TOOL,
                "--name",
                "masterTest",
                "--git-reference",
                "master",
                "--image-id",
                "4728f8f5ce1709ec8b8a5282e274e63de3c67b95f03a519191e6ea675c5d34e8",
            ],
            ExitCode::Success,
        )
        .await?;
    assert_eq!(test.count(tags).await?, 1);

    test.cli
        .run_expect(
            &[
                "tool",
                "version_tag",
                "add",
                "--entry",
                MANUAL_TOOL,
                "--name",
                "masterTest",
                "--git-reference",
                "master",
            ],
            ExitCode::ClientError,
        )
        .await?;
    assert_eq!(test.count(tags).await?, 1);

    test.cli
        .run_expect(
            &[
                "tool",
                "version_tag",
                "remove",
                "--entry",
                MANUAL_TOOL,
                "--name",
                "masterTest",
            ],
            ExitCode::Success,
        )
        .await?;
    assert_eq!(test.count(tags).await?, 0);

    test.cli
        .run_expect(
            &[
                "tool",
                "version_tag",
                "remove",
                "--entry",
                MANUAL_TOOL,
                "--name",
                "masterTest",
            ],
            ExitCode::ClientError,
        )
        .await?;

    test.assert_no_leaked_connections().await
}

/// Tests that tags of registry-built tools cannot be edited.
///
/// Expected: Ok with CLIENT_ERROR and no tag added
#[tokio::test]
async fn version_tag_requires_manual_tool() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(
            &[
                "tool",
                "version_tag",
                "add",
                "--entry",
                QUAY_AND_GITHUB,
                "--name",
                "masterTest",
                "--git-reference",
                "master",
            ],
            ExitCode::ClientError,
        )
        .await?;

    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM tag WHERE name = 'masterTest'")
            .await?,
        0
    );

    test.assert_no_leaked_connections().await
}

/// Tests registering a tool by hand.
///
/// Verifies the tool is created in manual mode with its first tag, and that
/// registering the same tool twice is rejected by the webservice.
///
/// Expected: Ok with SUCCESS, then API_ERROR for the duplicate
#[tokio::test]
async fn manual_publish_registers_tool() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let args = [
        "tool",
        "manual_publish",
        "--registry",
        "registry.hub.docker.com",
        "--namespace",
        "dockstoretestuser",
        "--name",
        "dockerhubandgithub",
        "--git-url",
        "git@github.com:DockstoreTestUser/dockstore-whalesay.git",
        "--git-reference",
        "master",
    ];

    test.cli.run_expect(&args, ExitCode::Success).await?;

    assert_eq!(
        test.count(
            "SELECT COUNT(*) AS count FROM tool \
             WHERE name = 'dockerhubandgithub' AND mode = 'MANUAL_IMAGE_PATH'"
        )
        .await?,
        1
    );
    assert_eq!(
        test.count(
            "SELECT COUNT(*) AS count FROM tag JOIN tool ON tag.tool_id = tool.id \
             WHERE tool.name = 'dockerhubandgithub' AND tag.name = 'latest'"
        )
        .await?,
        1
    );
    assert!(test
        .cli
        .output
        .stdout()
        .contains("Successfully registered registry.hub.docker.com/dockstoretestuser/dockerhubandgithub"));

    test.cli.run_expect(&args, ExitCode::ApiError).await?;

    test.assert_no_leaked_connections().await
}

/// Tests that a git URL that is neither SSH nor HTTPS is rejected before any request.
///
/// Expected: Ok with CLIENT_ERROR
#[tokio::test]
async fn manual_publish_rejects_invalid_git_url() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(
            &[
                "tool",
                "manual_publish",
                "--registry",
                "quay.io",
                "--namespace",
                "dockstoretestuser",
                "--name",
                "badgit",
                "--git-url",
                "github.com/DockstoreTestUser/dockstore-whalesay",
                "--git-reference",
                "master",
            ],
            ExitCode::ClientError,
        )
        .await?;

    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM tool WHERE name = 'badgit'")
            .await?,
        0
    );

    Ok(())
}

/// Tests `tool info` for published, unpublished and unknown tools.
///
/// Expected: Ok with SUCCESS, ENTRY_NOT_FOUND and ENTRY_NOT_FOUND
#[tokio::test]
async fn info_shows_only_published_tools() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(
            &["tool", "info", "--entry", "quay.io/dockstoretestuser/quayandbitbucket"],
            ExitCode::Success,
        )
        .await?;
    let stdout = test.cli.output.stdout();
    assert!(stdout.contains("TOOL: quay.io/dockstoretestuser/quayandbitbucket"));
    assert!(stdout.contains("latest"));

    test.cli
        .run_expect(&["tool", "info", "--entry", QUAY_AND_GITHUB], ExitCode::EntryNotFound)
        .await?;

    test.cli
        .run_expect(
            &["tool", "info", "--entry", "quay.io/dockstoretestuser/doesnotexist"],
            ExitCode::EntryNotFound,
        )
        .await?;

    test.assert_no_leaked_connections().await
}

/// Tests that `tool list` shows the user's own tools, published or not.
///
/// Expected: Ok with every tool of `user1` and none of `user2`
#[tokio::test]
async fn list_shows_own_tools() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(&["tool", "list"], ExitCode::Success)
        .await?;

    let stdout = test.cli.output.stdout();
    assert!(stdout.contains("quayandgithub"));
    assert!(stdout.contains("quayandbitbucket"));
    assert!(stdout.contains("manualtool"));
    assert!(!stdout.contains("publictool"));

    Ok(())
}

/// Tests that search only matches published tools.
///
/// Expected: Ok with the published Bitbucket tool and without the unpublished GitHub tool
#[tokio::test]
async fn search_matches_published_tools() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;

    test.cli
        .run_expect(&["tool", "search", "--pattern", "QUAYAND"], ExitCode::Success)
        .await?;

    let stdout = test.cli.output.stdout();
    assert!(stdout.contains("quayandbitbucket"));
    assert!(!stdout.contains("quayandgithub"));

    Ok(())
}

/// Tests refreshing a GitHub tool whose descriptor disappeared.
///
/// The refresh marks the only tag invalid, after which the tool can no longer
/// be published.
///
/// Expected: Ok with SUCCESS for the refresh, then API_ERROR for publishing
#[tokio::test]
async fn refresh_invalidates_tags_without_descriptor() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_github_endpoint(|server| {
            server
                .mock(
                    "GET",
                    "/repos/DockstoreTestUser/dockstore-whalesay/contents/Dockstore.cwl",
                )
                .match_query(Matcher::UrlEncoded("ref".into(), "master".into()))
                .with_status(404)
                .with_body(r#"{"message":"Not Found"}"#)
                .expect(1)
                .create()
        })
        .build()
        .await?;

    test.cli
        .run_expect(&["tool", "refresh", "--entry", QUAY_AND_GITHUB], ExitCode::Success)
        .await?;
    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM tag WHERE tool_id = 1 AND valid")
            .await?,
        0
    );

    test.cli
        .run_expect(&["tool", "publish", "--entry", QUAY_AND_GITHUB], ExitCode::ApiError)
        .await?;

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}
