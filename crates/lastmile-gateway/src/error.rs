//! Error types for the gateway API layer.
//!
//! [`GatewayError`] unifies all HTTP-visible failure modes into a single
//! enum that converts into an Axum response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Ingestion errors from the tracker core are deliberately NOT here:
//! those are logged and dropped per event, never surfaced to callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the gateway API layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request body is missing a required field or malformed.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidBody(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
