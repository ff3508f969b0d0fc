//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Error surfaced to HTTP clients. All bodies are `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid request input → 400.
    BadRequest(String),
    /// Remote upload or generation failed → 500.
    Upstream(prepkit_core::Error),
    /// Local failure (I/O, sidecar handling) → 500.
    Internal(String),
}

impl From<prepkit_core::Error> for ApiError {
    fn from(err: prepkit_core::Error) -> Self {
        match err {
            prepkit_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Upstream(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
