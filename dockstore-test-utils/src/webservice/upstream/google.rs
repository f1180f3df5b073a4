use serde::Deserialize;

use crate::{
    constant::{GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET, OAUTH_REDIRECT_URI},
    webservice::error::Error,
};

use super::check;

static SERVICE: &str = "Google";

#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleTokenInfo {
    pub audience: String,
    pub email: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Client for the Google OAuth2 endpoints.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    base_url: String,
}

impl GoogleClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<GoogleTokenResponse, Error> {
        let response = self
            .http
            .post(format!("{}/oauth2/v4/token", self.base_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", GOOGLE_CLIENT_ID),
                ("client_secret", GOOGLE_CLIENT_SECRET),
                ("redirect_uri", redirect_uri.unwrap_or(OAUTH_REDIRECT_URI)),
            ])
            .send()
            .await?;

        Ok(check(SERVICE, response).await?.json().await?)
    }

    pub async fn token_info(&self, access_token: &str) -> Result<GoogleTokenInfo, Error> {
        let response = self
            .http
            .get(format!("{}/oauth2/v2/tokeninfo", self.base_url))
            .query(&[("access_token", access_token)])
            .send()
            .await?;

        Ok(check(SERVICE, response).await?.json().await?)
    }

    pub async fn user_info(&self, access_token: &str) -> Result<GoogleUserInfo, Error> {
        let response = self
            .http
            .get(format!("{}/oauth2/v2/userinfo", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        Ok(check(SERVICE, response).await?.json().await?)
    }
}
