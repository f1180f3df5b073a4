//! Error type of the webservice stand-in.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dockstore::model::api::ErrorDto;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unknown bearer token.
    #[error("{0}")]
    Unauthorized(String),
    /// Authenticated, but the entry belongs to someone else.
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// The request conflicts with the entry's state, e.g. publishing without versions.
    #[error("{0}")]
    BadRequest(String),
    /// The entry already exists.
    #[error("{0}")]
    Conflict(String),
    /// A simulated upstream service answered with a failure status.
    ///
    /// Unmatched simulation requests land here with mockito's 501.
    #[error("{service} request to {url} failed with status {status}")]
    Upstream {
        service: &'static str,
        url: String,
        status: u16,
    },
    /// Malformed upstream payload.
    #[error("Invalid response from {service}: {reason}")]
    UpstreamPayload {
        service: &'static str,
        reason: String,
    },
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream { .. } | Self::UpstreamPayload { .. } | Self::ReqwestError(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::DbErr(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::DbErr(_) => InternalServerError(self).into_response(),
            err => {
                let status = err.status();
                if status.is_server_error() {
                    tracing::warn!("{}", err);
                } else {
                    tracing::debug!("{}", err);
                }

                (
                    status,
                    Json(ErrorDto {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Logs the error and answers 500 without exposing its details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
