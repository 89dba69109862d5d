//! CORS layer from gateway configuration.

use crate::domain::CorsConfig;
use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. Disabled CORS emits no headers.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_builds_for_every_shape() {
        let _ = create_cors_layer(&CorsConfig::default());
        let _ = create_cors_layer(&CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://explorer.example".into(), "not a url\n".into()],
        });
        let _ = create_cors_layer(&CorsConfig {
            enabled: false,
            allowed_origins: vec![],
        });
    }
}
