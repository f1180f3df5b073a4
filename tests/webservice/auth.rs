//! Tests for the OAuth token endpoints.

use super::*;

static GOOGLE_EMAIL: &str = "dockstore.test.user@gmail.com";

/// Tests signing up with Google.
///
/// Verifies the code exchange, token info and user info are each requested once,
/// and a user named after the Google account is created with the Google token.
///
/// Expected: Ok with 200 and a new user holding a `google.com` token
#[tokio::test]
async fn google_login_creates_user() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_google_login("fakeGoogleCode", GOOGLE_EMAIL)
        .build()
        .await?;

    let response = reqwest::Client::new()
        .post(format!("{}/auth/tokens/google", test.webservice.url()))
        .json(&json!({ "code": "fakeGoogleCode" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let token: TokenDto = response.json().await?;
    assert_eq!(token.token_source, "google.com");
    assert_eq!(token.content, GOOGLE_ACCESS_TOKEN);
    assert_eq!(token.username, GOOGLE_EMAIL);

    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM enduser").await?,
        3
    );
    assert_eq!(
        test.count(
            "SELECT COUNT(*) AS count FROM token t JOIN enduser u ON t.user_id = u.id \
             WHERE u.username = 'dockstore.test.user@gmail.com' AND t.token_source = 'google.com' \
             AND t.refresh_token = 'fakeGoogleRefreshToken'"
        )
        .await?,
        1
    );

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}

/// Tests linking Google to an existing user.
///
/// Expected: Ok with the token stored on `user1` and no new user
#[tokio::test]
async fn google_login_links_authenticated_user() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_google_login("fakeGoogleCode", GOOGLE_EMAIL)
        .build()
        .await?;

    let response = reqwest::Client::new()
        .post(format!("{}/auth/tokens/google", test.webservice.url()))
        .bearer_auth(USER1_TOKEN)
        .json(&json!({ "code": "fakeGoogleCode" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let token: TokenDto = response.json().await?;
    assert_eq!(token.user_id, 1);
    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM enduser").await?,
        2
    );

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}

/// Tests a Google token issued to another OAuth client.
///
/// Expected: Ok with 401, no user created and user info never requested
#[tokio::test]
async fn google_token_for_other_client_is_rejected() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    test.google
        .mock_token_exchange("fakeGoogleCode", 1)
        .mock_token_info(GOOGLE_EMAIL, "someone_else.apps.googleusercontent.com", 1)
        .mock_user_info(GOOGLE_EMAIL, 0);

    let response = reqwest::Client::new()
        .post(format!("{}/auth/tokens/google", test.webservice.url()))
        .json(&json!({ "code": "fakeGoogleCode" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(
        test.count("SELECT COUNT(*) AS count FROM enduser").await?,
        2
    );

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}

/// Tests linking a GitHub account to `user2`.
///
/// Expected: Ok with 200 and a `github.com` token for `user2`
#[tokio::test]
async fn github_link_stores_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_github_token_exchange("fakeGitHubCode", 1)
        .with_github_user(GITHUB_USERNAME, 1)
        .build()
        .await?;

    let response = reqwest::Client::new()
        .post(format!("{}/auth/tokens/github", test.webservice.url()))
        .bearer_auth(USER2_TOKEN)
        .json(&json!({ "code": "fakeGitHubCode" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let token: TokenDto = response.json().await?;
    assert_eq!(token.user_id, 2);
    assert_eq!(token.username, GITHUB_USERNAME);
    assert_eq!(
        test.count(
            "SELECT COUNT(*) AS count FROM token WHERE user_id = 2 AND token_source = 'github.com'"
        )
        .await?,
        1
    );

    test.assert_mocks();
    test.assert_no_leaked_connections().await
}

/// Tests linking GitHub without being logged in.
///
/// Expected: Ok with 401 and the simulation never called
#[tokio::test]
async fn github_link_requires_authentication() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_github_token_exchange("fakeGitHubCode", 0)
        .build()
        .await?;

    let response = reqwest::Client::new()
        .post(format!("{}/auth/tokens/github", test.webservice.url()))
        .json(&json!({ "code": "fakeGitHubCode" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.text().await?;
    assert!(predicate::str::contains("bearer token").eval(&body));

    test.assert_mocks();
    Ok(())
}
