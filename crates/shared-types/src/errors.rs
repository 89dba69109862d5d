//! # Error Types
//!
//! Errors raised by search backend implementations.

use thiserror::Error;

/// Errors from a search backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Backend could not be reached (connection refused, timeout, ...).
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// Backend answered with a non-success status.
    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered with a body that could not be decoded.
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    /// The named shard does not exist.
    #[error("Shard not found: {0}")]
    ShardNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = BackendError::Status {
            status: 503,
            body: "unavailable".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_shard_not_found_display() {
        let err = BackendError::ShardNotFound("action_traces-9".into());
        assert!(err.to_string().contains("action_traces-9"));
    }
}
