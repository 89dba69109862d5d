//! # Domain Layer
//!
//! Gateway configuration, wire errors and chain-node payloads.

pub mod chain;
pub mod config;
pub mod error;

pub use chain::{packed_reference, BlockTransaction, ChainBlock, ChainInfo};
pub use config::{ConfigError, CorsConfig, GatewayConfig, DEFAULT_PATH_PREFIX};
pub use error::{ApiError, ChainNodeError, GatewayError};
