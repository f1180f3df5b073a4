//! Tests for anonymous GA4GH TRS descriptor access.

use super::*;

fn descriptor_url(base: &str, id: &str, version: &str, descriptor_type: &str) -> String {
    format!(
        "{base}/ga4gh/trs/v2/tools/{}/versions/{version}/{descriptor_type}/descriptor",
        urlencoding::encode(id)
    )
}

/// Tests fetching a published workflow's descriptor without a token.
///
/// Expected: Ok with the CWL content and a raw GitHub URL
#[tokio::test]
async fn published_workflow_descriptor_is_public() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let descriptor: DescriptorDto = reqwest::get(descriptor_url(
        &test.webservice.url(),
        "#workflow/github.com/DockstoreTestUser2/dockstore-whalesay-imports",
        "master",
        "PLAIN_CWL",
    ))
    .await?
    .error_for_status()?
    .json()
    .await?;

    assert!(predicate::str::contains("class: Workflow").eval(&descriptor.content));
    assert_eq!(
        descriptor.url,
        "https://raw.githubusercontent.com/DockstoreTestUser2/dockstore-whalesay-imports/master/Dockstore.cwl"
    );

    test.assert_no_leaked_connections().await
}

/// Tests that unpublished entries are hidden from anonymous callers but not from their owner.
///
/// Expected: Ok with 404 anonymously and 200 for `user1`
#[tokio::test]
async fn unpublished_tool_descriptor_is_owner_only() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let url = descriptor_url(
        &test.webservice.url(),
        "quay.io/dockstoretestuser/quayandgithub",
        "master",
        "CWL",
    );
    let client = reqwest::Client::new();

    let anonymous = client.get(&url).send().await?;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let owner = client.get(&url).bearer_auth(USER1_TOKEN).send().await?;
    assert_eq!(owner.status(), StatusCode::OK);

    test.assert_no_leaked_connections().await
}

/// Tests asking for a descriptor language the entry does not have.
///
/// Expected: Ok with 404 for WDL and 400 for an unknown language
#[tokio::test]
async fn wrong_descriptor_type_is_rejected() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let id = "#workflow/github.com/DockstoreTestUser2/dockstore-whalesay-imports";

    let wdl = reqwest::get(descriptor_url(&test.webservice.url(), id, "master", "WDL")).await?;
    assert_eq!(wdl.status(), StatusCode::NOT_FOUND);

    let nfl = reqwest::get(descriptor_url(&test.webservice.url(), id, "master", "NFL")).await?;
    assert_eq!(nfl.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
