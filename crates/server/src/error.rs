//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Server result type
pub type Result<T> = std::result::Result<T, ServerError>;

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Batch too large: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Access denied for service: {0}")]
    AccessDenied(String),

    #[error("Dataset load failed: {0}")]
    DatasetLoad(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<blindquery_ot::OtError> for ServerError {
    fn from(err: blindquery_ot::OtError) -> Self {
        match err {
            blindquery_ot::OtError::MalformedItem(msg) => ServerError::InvalidRequest(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::BatchTooLarge { .. } => (StatusCode::BAD_REQUEST, "BATCH_TOO_LARGE"),
            ServerError::UnknownService(_) => (StatusCode::UNAUTHORIZED, "UNKNOWN_SERVICE"),
            ServerError::AccessDenied(_) => (StatusCode::UNAUTHORIZED, "ACCESS_DENIED"),
            ServerError::DatasetLoad(_) => (StatusCode::SERVICE_UNAVAILABLE, "DATASET_LOAD"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
