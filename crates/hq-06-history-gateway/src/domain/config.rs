//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Mount point of the history routes.
pub const DEFAULT_PATH_PREFIX: &str = "/v1/history";

/// HTTP gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8888)
    pub port: u16,
    /// Mount point of the history routes, no trailing slash
    pub path_prefix: String,
    /// Largest accepted request body, in bytes
    pub max_body_size: usize,
    /// Whole-request deadline
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8888,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path_prefix.starts_with('/') || self.path_prefix.ends_with('/') {
            return Err(ConfigError::InvalidPathPrefix(self.path_prefix.clone()));
        }

        if self.max_body_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_size cannot be 0".into(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request_timeout cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// HTTP bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Full path of one history route.
    pub fn route(&self, name: &str) -> String {
        format!("{}/{}", self.path_prefix, name)
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Emit CORS headers at all
    pub enabled: bool,
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Path prefix must start with `/` and not end with one
    #[error("invalid path prefix: {0}")]
    InvalidPathPrefix(String),

    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    /// Invalid timeout
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.route("get_actions"), "/v1/history/get_actions");
        assert_eq!(config.http_addr().port(), 8888);
    }

    #[test]
    fn test_trailing_slash_rejected() {
        let config = GatewayConfig {
            path_prefix: "/v1/history/".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPathPrefix(_))
        ));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = GatewayConfig {
            max_body_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GatewayConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_humantime_timeout() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{ "port": 9000, "request_timeout": "5s" }"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.path_prefix, DEFAULT_PATH_PREFIX);
    }
}
