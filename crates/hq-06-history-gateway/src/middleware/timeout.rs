//! Request deadline.
//!
//! Unlike a bare timeout layer, the expiry answers with the usual
//! `{code, message}` body.

use crate::domain::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::warn;

/// Fail the request with 408 once `deadline` has passed.
pub async fn enforce_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%path, deadline_ms = deadline.as_millis() as u64, "Request deadline exceeded");
            ApiError::timeout().into_response()
        }
    }
}
