use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use dockstore::model::user::UserDto;

use crate::webservice::{
    error::Error,
    service::{ToolService, WorkflowService},
    state::{AuthUser, WebserviceState},
};

/// The user owning the request's token
pub async fn get_user(AuthUser(user): AuthUser) -> Result<impl IntoResponse, Error> {
    let dto = UserDto {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    };

    Ok((StatusCode::OK, Json(dto)))
}

pub async fn get_user_tools(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let tools = ToolService::new(&state.db)
        .list_for_user(user_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(tools)))
}

pub async fn get_user_workflows(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let workflows = WorkflowService::new(&state.db)
        .list_for_user(user_id, &user)
        .await?;

    Ok((StatusCode::OK, Json(workflows)))
}

/// GitHub organizations visible to the user's linked GitHub account
pub async fn get_github_organizations(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Error> {
    let organizations = WorkflowService::new(&state.db)
        .organizations(&user, &state.github)
        .await?;

    Ok((StatusCode::OK, Json(organizations)))
}

pub async fn get_github_repositories(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(organization): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let repositories = WorkflowService::new(&state.db)
        .repositories(&organization, &user, &state.github)
        .await?;

    Ok((StatusCode::OK, Json(repositories)))
}
