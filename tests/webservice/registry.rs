//! Tests for the GitHub organization and repository listings.

use super::*;

/// Tests listing the organizations of the linked GitHub account.
///
/// Expected: Ok with the simulated organizations
#[tokio::test]
async fn lists_github_organizations() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_github_organizations(&["DockstoreTestUser2", "dockstore-testing"], 1)
        .build()
        .await?;

    let organizations: Vec<String> = reqwest::Client::new()
        .get(format!(
            "{}/users/registries/github/organizations",
            test.webservice.url()
        ))
        .bearer_auth(USER1_TOKEN)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(organizations, vec!["DockstoreTestUser2", "dockstore-testing"]);

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}

/// Tests listing an organization's repositories with their registration state.
///
/// Expected: Ok with the registered workflow repository flagged
#[tokio::test]
async fn lists_organization_repositories() -> Result<(), TestError> {
    let mut unregistered = hello_dockstore_workflow();
    unregistered.name = "not-on-dockstore".to_string();

    let test = TestBuilder::new()
        .with_github_user_repositories(vec![hello_dockstore_workflow(), unregistered], 1)
        .build()
        .await?;

    let repositories: serde_json::Value = reqwest::Client::new()
        .get(format!(
            "{}/users/registries/github/organizations/DockstoreTestUser2",
            test.webservice.url()
        ))
        .bearer_auth(USER1_TOKEN)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(
        repositories,
        json!([
            { "path": "DockstoreTestUser2/hello-dockstore-workflow", "registered": true },
            { "path": "DockstoreTestUser2/not-on-dockstore", "registered": false },
        ])
    );

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}

/// Tests the listing for a user without a linked GitHub account.
///
/// Expected: Ok with 400
#[tokio::test]
async fn listing_requires_github_token() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let response = reqwest::Client::new()
        .get(format!(
            "{}/users/registries/github/organizations",
            test.webservice.url()
        ))
        .bearer_auth(USER2_TOKEN)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
