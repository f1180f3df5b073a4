use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::webservice::{
    error::Error,
    service::TrsService,
    state::{MaybeUser, WebserviceState},
};

pub async fn get_descriptor(
    State(state): State<WebserviceState>,
    MaybeUser(user): MaybeUser,
    Path((id, version, descriptor_type)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, Error> {
    let descriptor = TrsService::new(&state.db)
        .descriptor(&id, &version, &descriptor_type, user.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(descriptor)))
}
