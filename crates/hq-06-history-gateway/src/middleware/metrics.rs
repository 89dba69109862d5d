//! Prometheus request metrics.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use history_telemetry::{HistogramTimer, HTTP_REQUESTS, HTTP_REQUEST_DURATION};

/// Metric label for a route: its last path segment, `unmatched` otherwise.
pub fn endpoint_label(matched: Option<&str>) -> String {
    matched
        .and_then(|path| path.rsplit('/').find(|segment| !segment.is_empty()))
        .unwrap_or("unmatched")
        .to_string()
}

/// Count and time every request by endpoint.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let endpoint = endpoint_label(
        request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str),
    );

    let response = {
        let _timer = HistogramTimer::labelled(&HTTP_REQUEST_DURATION, &[&endpoint]);
        next.run(request).await
    };

    HTTP_REQUESTS
        .with_label_values(&[&endpoint, response.status().as_str()])
        .inc();
    response
}
