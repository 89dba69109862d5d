//! # Middleware
//!
//! Request-wide layers: CORS, deadline, metrics.

pub mod cors;
pub mod metrics;
pub mod timeout;

pub use cors::create_cors_layer;
pub use metrics::{endpoint_label, track_metrics};
pub use timeout::enforce_deadline;
