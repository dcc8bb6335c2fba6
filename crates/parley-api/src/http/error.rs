//! Application error types mapping to HTTP responses.
//!
//! Client-facing bodies are fixed strings; the underlying error is logged
//! and never echoed back.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::ChatError;

/// Plain-text error used by the `/chat` routes.
#[derive(Debug)]
pub enum AppError {
    /// A required identifier was missing.
    NotFound,
    /// No usable session, or the resource belongs to someone else.
    Unauthorized,
    /// Upstream or storage failure. The message is for logs only.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::NotFound => AppError::NotFound,
            ChatError::Unauthorized => AppError::Unauthorized,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing your request",
                )
            }
        };
        (status, body).into_response()
    }
}

/// JSON error used by `/history`: `{"message": "..."}`.
#[derive(Debug)]
pub enum JsonError {
    Unauthorized,
    Internal(String),
}

impl From<ChatError> for JsonError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Unauthorized => JsonError::Unauthorized,
            other => JsonError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            JsonError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized!"),
            JsonError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "An error occurred!")
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
