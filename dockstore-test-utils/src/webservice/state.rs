use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::DatabaseConnection;

use super::{
    data::UserRepository,
    error::Error,
    upstream::{github::GitHubClient, google::GoogleClient},
};

#[derive(Clone)]
pub struct WebserviceState {
    pub db: DatabaseConnection,
    pub github: GitHubClient,
    pub google: GoogleClient,
}

/// The user owning the request's bearer token.
pub struct AuthUser(pub entity::enduser::Model);

/// Like [`AuthUser`], but anonymous requests are allowed.
pub struct MaybeUser(pub Option<entity::enduser::Model>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

impl FromRequestParts<WebserviceState> for MaybeUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &WebserviceState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Self(None));
        };

        match UserRepository::new(&state.db)
            .get_by_dockstore_token(token)
            .await?
        {
            Some(user) => Ok(Self(Some(user))),
            None => Err(Error::Unauthorized("Invalid token".to_string())),
        }
    }
}

impl FromRequestParts<WebserviceState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &WebserviceState,
    ) -> Result<Self, Self::Rejection> {
        match MaybeUser::from_request_parts(parts, state).await? {
            MaybeUser(Some(user)) => Ok(Self(user)),
            MaybeUser(None) => Err(Error::Unauthorized(
                "This endpoint requires a bearer token".to_string(),
            )),
        }
    }
}
