//! HTTP client for the Dockstore webservice.
//!
//! Wraps `reqwest` with the conventions every command relies on: bearer-token
//! authentication, mapping of unreachable servers to [`Error::ConnectionError`] and
//! of non-success statuses to [`Error::ApiError`] with the server's message.

mod trs;
mod tool;
mod user;
mod workflow;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{config::Config, error::Error, model::api::ErrorDto};

/// Client bound to one webservice and, optionally, one user token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for the webservice named in the config.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dockstore-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.server_url.clone(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending API request");

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and checks the status, without decoding the body.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, Error> {
        let response = builder.send().await.map_err(|source| {
            if source.is_connect() || source.is_timeout() {
                Error::ConnectionError {
                    url: self.base_url.clone(),
                    source,
                }
            } else {
                Error::ReqwestError(source)
            }
        })?;

        let status = response.status();
        debug!(%status, url = %response.url(), "Received API response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorDto>(&body)
            .map(|dto| dto.error)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("no reason given").to_string()
                } else {
                    body
                }
            });

        Err(Error::ApiError {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Fails with a client error before any request when no token is configured.
    fn require_token(&self) -> Result<(), Error> {
        match self.token {
            Some(_) => Ok(()),
            None => Err(Error::ClientError(
                "This command requires a token, please add `token = ...` to your config file"
                    .to_string(),
            )),
        }
    }
}
