//! # HQ-01 Shard Catalog
//!
//! Discovers the physical shards of every logical stream and publishes them
//! as one immutable snapshot.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! The search backend stores each stream as an append-only group of indices
//! (`action_traces-0`, `action_traces-1`, ...). New shards appear while the
//! service runs, so the shard list is re-discovered on a timer:
//! - The backend's index listing is parsed against the four known prefixes
//! - Shards are ordered ascending by numeric suffix (chronological order)
//! - The new catalog replaces the old one with a single pointer swap
//!
//! ## Publication Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | No torn reads | All streams live in one `Arc<ShardCatalog>`, swapped atomically |
//! | Readers never block | `ArcSwap::load_full` is lock-free |
//! | Last-known-good on failure | A failed listing leaves the current snapshot in place |
//! | Refresh never deadlocks | The refresh task retries on the next tick |
//!
//! ## Module Structure
//!
//! ```text
//! hq-01-shard-catalog/
//! ├── domain/          # Shard, ShardCatalog, CatalogStatus, CatalogError
//! ├── algorithms/      # Index listing parser
//! ├── ports/           # CatalogReader (inbound)
//! └── service.rs       # ShardCatalogService + refresh task
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{parse_index_listing, parse_shard_name};
pub use domain::{CatalogError, CatalogStatus, Shard, ShardCatalog};
pub use ports::{CatalogReader, StaticCatalog};
pub use service::{ShardCatalogService, DEFAULT_REFRESH_INTERVAL};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
