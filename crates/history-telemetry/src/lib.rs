//! # History Telemetry
//!
//! Observability for the history query service.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered as JSON lines or human output
//! - **Traces**: optional OpenTelemetry span export over OTLP/gRPC
//! - **Metrics**: a Prometheus registry scraped from `GET /metrics`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use history_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).await?;
//!     // Spans are flushed when the guard drops.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset | Collector endpoint; unset disables export |
//! | `OTEL_SERVICE_NAME` | `history-query` | Service name in traces |
//! | `HQ_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `HQ_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod logging;
mod metrics;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{build_filter, init_subscriber};
pub use metrics::{
    encode_metrics, record_backend_call, register_metrics, HistogramTimer, MetricsHandle,
    BACKEND_CALLS, BACKEND_CALL_DURATION, CATALOG_REFRESHES, CATALOG_SHARDS, HTTP_REQUESTS,
    HTTP_REQUEST_DURATION, REGISTRY,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Trace pipeline or subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),

    /// Metric registration or encoding failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global subscriber.
///
/// Returns a guard that must be held for the lifetime of the application;
/// dropping it flushes pending spans.
pub async fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    let tracing_guard = init_subscriber(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active. Drop to flush and shutdown.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry");
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = TelemetryError::Config("bad filter".into());
        assert!(err.to_string().contains("bad filter"));
    }
}
