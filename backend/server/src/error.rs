use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::{BuildError, NotFound};
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;

/// Anything that keeps the service from starting, or a reload from completing.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid {key} value: {reason}")]
    Config { key: &'static str, reason: String },

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Index build task failed: {0}")]
    Join(#[from] JoinError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("Reload failed: {0}")]
    Reload(#[from] StartupError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Reload { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
