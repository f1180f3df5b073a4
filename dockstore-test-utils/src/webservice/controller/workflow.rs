use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use dockstore::model::api::PublishRequest;

use crate::webservice::{
    error::Error,
    service::WorkflowService,
    state::{AuthUser, MaybeUser, WebserviceState},
};

pub async fn get_workflow_by_path(
    State(state): State<WebserviceState>,
    MaybeUser(user): MaybeUser,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let workflow = WorkflowService::new(&state.db)
        .get_by_path(&path, user.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(workflow)))
}

pub async fn publish_workflow(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(workflow_id): Path<i32>,
    Json(request): Json<PublishRequest>,
) -> Result<impl IntoResponse, Error> {
    let workflow = WorkflowService::new(&state.db)
        .set_published(workflow_id, request.publish, &user)
        .await?;

    Ok((StatusCode::OK, Json(workflow)))
}

/// Rebuilds the workflow's versions from GitHub
pub async fn refresh_workflow(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(workflow_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let workflow = WorkflowService::new(&state.db)
        .refresh(workflow_id, &user, &state.github)
        .await?;

    Ok((StatusCode::OK, Json(workflow)))
}
