use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use dockstore::model::user::OAuthCodeRequest;

use crate::webservice::{
    error::Error,
    service::AuthService,
    state::{AuthUser, MaybeUser, WebserviceState},
};

/// Links a GitHub account to the caller using an OAuth authorization code
pub async fn link_github(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Json(request): Json<OAuthCodeRequest>,
) -> Result<impl IntoResponse, Error> {
    let token = AuthService::new(&state.db)
        .link_github(&request.code, &user, &state.github)
        .await?;

    Ok((StatusCode::OK, Json(token)))
}

/// Logs in, or signs up, with a Google OAuth authorization code
///
/// An authenticated caller gets the Google account linked instead.
pub async fn login_google(
    State(state): State<WebserviceState>,
    MaybeUser(user): MaybeUser,
    Json(request): Json<OAuthCodeRequest>,
) -> Result<impl IntoResponse, Error> {
    let token = AuthService::new(&state.db)
        .login_google(
            &request.code,
            request.redirect_uri.as_deref(),
            user.as_ref(),
            &state.google,
        )
        .await?;

    Ok((StatusCode::OK, Json(token)))
}
