//! # HQ-06 History Gateway
//!
//! HTTP surface of the history service.
//!
//! **Subsystem ID:** 06
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Routes
//!
//! | Route | Subsystem | Enrichment |
//! |-------|-----------|------------|
//! | `/v1/history/get_actions` | HQ-03 | `last_irreversible_block` |
//! | `/v1/history/find_actions` | HQ-03 | - |
//! | `/v1/history/get_transaction` | HQ-04 | `trx.receipt.trx`, `last_irreversible_block` |
//! | `/v1/history/get_key_accounts` | HQ-05 | - |
//! | `/v1/history/get_controlled_accounts` | HQ-05 | - |
//! | `/health` | HQ-01 | - |
//! | `/metrics` | telemetry | - |
//!
//! History routes take GET or POST with a JSON body. Errors are
//! `{ "code": <status>, "message": ... }`:
//!
//! - 400 `Invalid arguments.` for an undecodable body
//! - 404 for a missing or hard-failed transaction
//! - 405 `Invalid request method.` for any other method
//! - 500 for backend failures
//!
//! Chain-node enrichment is best effort: a failed call leaves its field
//! out and never fails the request.
//!
//! ## Module Structure
//!
//! ```text
//! hq-06-history-gateway/
//! ├── domain/          # GatewayConfig, ApiError, chain payloads
//! ├── ports/           # ChainNode (outbound)
//! ├── adapters/        # Error conversions, in-memory chain node
//! ├── middleware/      # CORS, deadline, request metrics
//! ├── router.rs        # Routes and handlers
//! └── service.rs       # HistoryGatewayService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod service;

// Re-exports
pub use adapters::StaticChainNode;
pub use domain::{
    packed_reference, ApiError, BlockTransaction, ChainBlock, ChainInfo, ChainNodeError,
    ConfigError, CorsConfig, GatewayConfig, GatewayError, DEFAULT_PATH_PREFIX,
};
pub use ports::ChainNode;
pub use router::{build_router, AppState};
pub use service::HistoryGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
