//! Google OAuth2 simulation.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

use crate::constant::{GOOGLE_CLIENT_ID, OAUTH_REDIRECT_URI};

pub static GOOGLE_ACCESS_TOKEN: &str = "fakeGoogleAccessToken";
pub static GOOGLE_REFRESH_TOKEN: &str = "fakeGoogleRefreshToken";

/// Stand-in for `www.googleapis.com` OAuth2 endpoints.
pub struct GoogleSimulation {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl GoogleSimulation {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    pub fn push(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// `POST /oauth2/v4/token` exchanging `code` for the fixture tokens.
    pub fn mock_token_exchange(&mut self, code: &str, expected_requests: usize) -> &mut Self {
        let mock = self
            .server
            .mock("POST", "/oauth2/v4/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), code.into()),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("redirect_uri".into(), OAUTH_REDIRECT_URI.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "access_token": GOOGLE_ACCESS_TOKEN,
                    "refresh_token": GOOGLE_REFRESH_TOKEN,
                    "expires_in": 3600,
                    "token_type": "Bearer",
                    "scope": "openid email profile",
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create();
        self.push(mock);
        self
    }

    /// `GET /oauth2/v2/tokeninfo` describing the fixture access token.
    ///
    /// `audience` is the OAuth client the token was issued to; anything other than
    /// the harness client id makes the webservice reject the login.
    pub fn mock_token_info(
        &mut self,
        email: &str,
        audience: &str,
        expected_requests: usize,
    ) -> &mut Self {
        let mock = self
            .server
            .mock("GET", "/oauth2/v2/tokeninfo")
            .match_query(Matcher::UrlEncoded(
                "access_token".into(),
                GOOGLE_ACCESS_TOKEN.into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "issued_to": audience,
                    "audience": audience,
                    "scope": "openid email profile",
                    "expires_in": 3599,
                    "email": email,
                    "verified_email": true,
                    "access_type": "offline",
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create();
        self.push(mock);
        self
    }

    /// Token info issued to the harness client.
    pub fn mock_valid_token_info(&mut self, email: &str, expected_requests: usize) -> &mut Self {
        self.mock_token_info(email, GOOGLE_CLIENT_ID, expected_requests)
    }

    /// `GET /oauth2/v2/userinfo` for the fixture access token.
    pub fn mock_user_info(&mut self, email: &str, expected_requests: usize) -> &mut Self {
        let mock = self
            .server
            .mock("GET", "/oauth2/v2/userinfo")
            .match_header(
                "authorization",
                format!("Bearer {GOOGLE_ACCESS_TOKEN}").as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "110832614568291304625",
                    "email": email,
                    "verified_email": true,
                    "name": "Dockstore Test User",
                    "picture": "https://lh3.googleusercontent.com/a/default-user",
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create();
        self.push(mock);
        self
    }

    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
