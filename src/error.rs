//! Error types for the proxy server
//!
//! Cache operations are infallible; these errors come from request
//! validation and the upstream API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::UnknownCategory;

// == App Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Category name outside the fixed set
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    /// Upstream could not be reached or returned an unreadable body
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}")]
    UpstreamStatus { status: u16, body: String },
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::UnknownCategory(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            AppError::Upstream(err) => (
                StatusCode::BAD_GATEWAY,
                "Proxy error".to_string(),
                Some(err.to_string()),
            ),
            AppError::UpstreamStatus { status, body } => (
                StatusCode::BAD_GATEWAY,
                format!("Upstream returned {}", status),
                Some(body.clone()),
            ),
        };

        let body = match details {
            Some(details) => json!({ "error": error, "details": details }),
            None => json!({ "error": error }),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy server.
pub type Result<T> = std::result::Result<T, AppError>;
