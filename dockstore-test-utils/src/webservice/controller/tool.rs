use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use dockstore::model::{
    api::PublishRequest,
    tool::{ManualToolRequest, NewTagDto},
};
use serde::Deserialize;

use crate::webservice::{
    error::Error,
    service::ToolService,
    state::{AuthUser, MaybeUser, WebserviceState},
};

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub pattern: String,
}

/// Tool by `registry/namespace/name[/toolname]`; unpublished tools only for their owner
pub async fn get_tool_by_path(
    State(state): State<WebserviceState>,
    MaybeUser(user): MaybeUser,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let tool = ToolService::new(&state.db)
        .get_by_path(&path, user.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(tool)))
}

pub async fn search_tools(
    State(state): State<WebserviceState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Error> {
    let tools = ToolService::new(&state.db).search(&params.pattern).await?;

    Ok((StatusCode::OK, Json(tools)))
}

pub async fn register_manual_tool(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ManualToolRequest>,
) -> Result<impl IntoResponse, Error> {
    let tool = ToolService::new(&state.db)
        .register_manual(request, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(tool)))
}

pub async fn publish_tool(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(tool_id): Path<i32>,
    Json(request): Json<PublishRequest>,
) -> Result<impl IntoResponse, Error> {
    let tool = ToolService::new(&state.db)
        .set_published(tool_id, request.publish, &user)
        .await?;

    Ok((StatusCode::OK, Json(tool)))
}

pub async fn refresh_tool(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(tool_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let tool = ToolService::new(&state.db)
        .refresh(tool_id, &user, &state.github)
        .await?;

    Ok((StatusCode::OK, Json(tool)))
}

pub async fn get_tags(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(tool_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let tags = ToolService::new(&state.db).get_tags(tool_id, &user).await?;

    Ok((StatusCode::OK, Json(tags)))
}

pub async fn add_tags(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path(tool_id): Path<i32>,
    Json(tags): Json<Vec<NewTagDto>>,
) -> Result<impl IntoResponse, Error> {
    let tags = ToolService::new(&state.db)
        .add_tags(tool_id, tags, &user)
        .await?;

    Ok((StatusCode::OK, Json(tags)))
}

pub async fn delete_tag(
    State(state): State<WebserviceState>,
    AuthUser(user): AuthUser,
    Path((tool_id, tag_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    ToolService::new(&state.db)
        .delete_tag(tool_id, tag_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
