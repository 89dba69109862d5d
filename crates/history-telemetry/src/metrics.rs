//! Prometheus metrics for the history query service.
//!
//! All metrics follow the naming convention: `hq_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., catalog_refreshes_total)
//! - **Gauge**: Value that can go up or down (e.g., catalog_shards)
//! - **Histogram**: Distribution of values (e.g., request_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, GaugeVec, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SHARD CATALOG METRICS (Subsystem 01)
    // =========================================================================

    /// Catalog refresh cycles
    pub static ref CATALOG_REFRESHES: CounterVec = CounterVec::new(
        Opts::new("hq_catalog_refreshes_total", "Shard catalog refresh cycles"),
        &["outcome"]  // outcome: success/failure
    ).expect("metric creation failed");

    /// Shards per stream in the published catalog
    pub static ref CATALOG_SHARDS: GaugeVec = GaugeVec::new(
        Opts::new("hq_catalog_shards", "Shards in the published catalog"),
        &["stream"]
    ).expect("metric creation failed");

    // =========================================================================
    // SEARCH BACKEND METRICS
    // =========================================================================

    /// Backend calls by operation
    pub static ref BACKEND_CALLS: CounterVec = CounterVec::new(
        Opts::new("hq_backend_calls_total", "Search backend calls"),
        &["operation", "outcome"]  // operation: list/count/msearch/mget
    ).expect("metric creation failed");

    /// Backend call latency
    pub static ref BACKEND_CALL_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "hq_backend_call_duration_seconds",
            "Time spent waiting on the search backend"
        ).buckets(exponential_buckets(0.0005, 2.0, 15).expect("valid buckets")),
        &["operation"]
    ).expect("metric creation failed");

    // =========================================================================
    // HTTP GATEWAY METRICS (Subsystem 06)
    // =========================================================================

    /// Requests by endpoint and status code
    pub static ref HTTP_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("hq_requests_total", "History API requests"),
        &["endpoint", "status"]
    ).expect("metric creation failed");

    /// Request latency by endpoint
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "hq_request_duration_seconds",
            "History API request latency"
        ).buckets(exponential_buckets(0.001, 2.0, 14).expect("valid buckets")),
        &["endpoint"]
    ).expect("metric creation failed");
}

/// Keeps the registry alive for the process lifetime.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Registering twice is not an error.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Catalog
        Box::new(CATALOG_REFRESHES.clone()),
        Box::new(CATALOG_SHARDS.clone()),
        // Backend
        Box::new(BACKEND_CALLS.clone()),
        Box::new(BACKEND_CALL_DURATION.clone()),
        // Gateway
        Box::new(HTTP_REQUESTS.clone()),
        Box::new(HTTP_REQUEST_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record one backend call outcome.
pub fn record_backend_call(operation: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    BACKEND_CALLS.with_label_values(&[operation, outcome]).inc();
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one label set of a histogram vector.
    pub fn labelled(histogram: &HistogramVec, labels: &[&str]) -> Self {
        Self::new(&histogram.with_label_values(labels))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics_is_idempotent() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_backend_call_counter() {
        let before = BACKEND_CALLS.with_label_values(&["count", "success"]).get();
        record_backend_call("count", true);
        let after = BACKEND_CALLS.with_label_values(&["count", "success"]).get();
        assert!(after >= before + 1.0);
    }

    #[test]
    fn test_encode_contains_registered_family() {
        register_metrics().unwrap();
        CATALOG_SHARDS.with_label_values(&["action_traces"]).set(3.0);
        let text = encode_metrics().unwrap();
        assert!(text.contains("hq_catalog_shards"));
    }

    #[test]
    fn test_histogram_timer() {
        let _timer = HistogramTimer::labelled(&HTTP_REQUEST_DURATION, &["get_actions"]);
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}
