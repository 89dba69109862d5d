//! # Runtime Configuration
//!
//! Loaded from a JSON file (`config.json`, or the path in `HQ_CONFIG`), then
//! overridden field by field from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `HQ_PORT` | `port` |
//! | `HQ_ELASTIC_URL` | `elastic_url` |
//! | `HQ_CHAIN_NODE_URL` | `chain_node_url` |
//!
//! A missing file is not an error; every field has a default.

use hq_01_shard_catalog::DEFAULT_REFRESH_INTERVAL;
use hq_06_history_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file read when `HQ_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// HTTP port of the gateway.
    pub port: u16,
    /// Elasticsearch base URL.
    pub elastic_url: String,
    /// Chain node base URL.
    pub chain_node_url: String,
    /// Shard catalog refresh period.
    #[serde(with = "humantime_serde")]
    pub catalog_refresh_interval: Duration,
    /// Per-call timeout for Elasticsearch and the chain node.
    #[serde(with = "humantime_serde")]
    pub backend_timeout: Duration,
    /// Gateway settings; `port` above wins over `gateway.port`.
    pub gateway: GatewayConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            port: 8888,
            elastic_url: "http://localhost:9200".to_string(),
            chain_node_url: "http://127.0.0.1:8080".to_string(),
            catalog_refresh_interval: DEFAULT_REFRESH_INTERVAL,
            backend_timeout: Duration::from_secs(10),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config file.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration JSON.
    #[error("failed to decode {path}: {source}")]
    Decode {
        /// Config file.
        path: PathBuf,
        /// Decode error.
        #[source]
        source: serde_json::Error,
    },

    /// An environment override has the wrong shape.
    #[error("invalid value for {name}: {value}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl RuntimeConfig {
    /// File, then environment, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HQ_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`; defaults when it does not exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from `lookup` (the process environment in
    /// production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("HQ_PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "HQ_PORT",
                value: port,
            })?;
        }
        if let Some(url) = lookup("HQ_ELASTIC_URL") {
            self.elastic_url = url;
        }
        if let Some(url) = lookup("HQ_CHAIN_NODE_URL") {
            self.chain_node_url = url;
        }
        Ok(())
    }

    /// Check ranges and the gateway section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elastic_url.trim().is_empty() {
            return Err(ConfigError::Invalid("elastic_url cannot be empty".into()));
        }
        if self.catalog_refresh_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "catalog_refresh_interval cannot be 0".into(),
            ));
        }
        if self.backend_timeout.is_zero() {
            return Err(ConfigError::Invalid("backend_timeout cannot be 0".into()));
        }
        self.gateway_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Gateway configuration with the top-level port applied.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            port: self.port,
            ..self.gateway.clone()
        }
    }
}
