//! Gateway error types.
//!
//! Every non-2xx response body is `{ "code": <http status>, "message": ... }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-facing error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code, repeated in the body
    pub code: u16,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }

    /// Body could not be read
    pub fn unreadable_body() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read request body.")
    }

    /// Body is not the expected JSON object
    pub fn invalid_arguments() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid arguments.")
    }

    /// Anything but GET or POST
    pub fn invalid_method() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Invalid request method.")
    }

    /// Unknown path
    pub fn unknown_route() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found.")
    }

    /// Resource not found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Deadline exceeded
    pub fn timeout() -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "Request timed out.")
    }

    /// Status code of the response.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Chain-node call failures. Never reach clients; enrichment is dropped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainNodeError {
    /// Node not reachable
    #[error("chain node unreachable: {0}")]
    Unreachable(String),

    /// Node answered with a non-success status
    #[error("chain node returned status {0}")]
    Status(u16),

    /// Node answered with an unexpected body
    #[error("malformed chain node response: {0}")]
    Malformed(String),
}

/// Gateway-level errors (startup and serving, not per request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}
