use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    constant::{GITHUB_CLIENT_ID, GITHUB_CLIENT_SECRET, OAUTH_REDIRECT_URI},
    webservice::error::Error,
};

use super::check;

static SERVICE: &str = "GitHub";

#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubOrganization {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct GitHubRepository {
    pub name: String,
    pub full_name: String,
    pub owner: GitHubOwner,
    pub default_branch: String,
}

#[derive(Debug, Deserialize)]
pub struct GitHubObject {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct GitHubRef {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: GitHubObject,
}

#[derive(Debug, Deserialize)]
struct GitHubContent {
    encoding: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GitHubInstallation {
    id: i64,
}

#[derive(Debug, Deserialize)]
pub struct GitHubAccessToken {
    pub access_token: String,
}

/// Client for the GitHub REST API and OAuth endpoints.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, token: &str, path: &str) -> Result<reqwest::Response, Error> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .header("accept", "application/vnd.github+json")
            .send()
            .await?;

        Ok(response)
    }

    /// Exchanges an OAuth authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<GitHubAccessToken, Error> {
        let response = self
            .http
            .post(format!("{}/login/oauth/access_token", self.base_url))
            .header("accept", "application/json")
            .form(&[
                ("client_id", GITHUB_CLIENT_ID),
                ("client_secret", GITHUB_CLIENT_SECRET),
                ("code", code),
                ("redirect_uri", OAUTH_REDIRECT_URI),
            ])
            .send()
            .await?;

        Ok(check(SERVICE, response).await?.json().await?)
    }

    pub async fn get_user(&self, token: &str) -> Result<GitHubUser, Error> {
        let response = self.get(token, "/user").await?;
        Ok(check(SERVICE, response).await?.json().await?)
    }

    pub async fn get_organizations(&self, token: &str) -> Result<Vec<GitHubOrganization>, Error> {
        let response = self.get(token, "/user/orgs").await?;
        Ok(check(SERVICE, response).await?.json().await?)
    }

    pub async fn get_user_repositories(
        &self,
        token: &str,
    ) -> Result<Vec<GitHubRepository>, Error> {
        let response = self.get(token, "/user/repos?per_page=100").await?;
        Ok(check(SERVICE, response).await?.json().await?)
    }

    pub async fn get_repository(
        &self,
        token: &str,
        full_name: &str,
    ) -> Result<GitHubRepository, Error> {
        let response = self.get(token, &format!("/repos/{full_name}")).await?;
        Ok(check(SERVICE, response).await?.json().await?)
    }

    pub async fn get_refs(&self, token: &str, full_name: &str) -> Result<Vec<GitHubRef>, Error> {
        let response = self
            .get(token, &format!("/repos/{full_name}/git/refs"))
            .await?;
        Ok(check(SERVICE, response).await?.json().await?)
    }

    /// Decoded file content at `reference`, or `None` if the file does not exist there.
    pub async fn get_file(
        &self,
        token: &str,
        full_name: &str,
        path: &str,
        reference: &str,
    ) -> Result<Option<String>, Error> {
        let url = format!(
            "/repos/{full_name}/contents/{}?ref={}",
            path.trim_start_matches('/'),
            urlencoding::encode(reference)
        );
        let response = self.get(token, &url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let content: GitHubContent = check(SERVICE, response).await?.json().await?;
        if content.encoding != "base64" {
            return Err(Error::UpstreamPayload {
                service: SERVICE,
                reason: format!("unsupported content encoding {:?}", content.encoding),
            });
        }

        // GitHub wraps base64 content at 60 columns
        let encoded: String = content
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| Error::UpstreamPayload {
                service: SERVICE,
                reason: e.to_string(),
            })?;

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| Error::UpstreamPayload {
                service: SERVICE,
                reason: e.to_string(),
            })
    }

    /// GitHub App installation id of the repository, `None` if the App is not installed.
    pub async fn get_installation_id(
        &self,
        token: &str,
        full_name: &str,
    ) -> Result<Option<i64>, Error> {
        let response = self
            .get(token, &format!("/repos/{full_name}/installation"))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let installation: GitHubInstallation = check(SERVICE, response).await?.json().await?;
        Ok(Some(installation.id))
    }
}
