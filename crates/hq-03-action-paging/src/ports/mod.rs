//! # Ports
//!
//! - `inbound`: the API the gateway calls.
//! - Outbound: [`shared_types::SearchBackend`] and
//!   [`hq_01_shard_catalog::CatalogReader`].

pub mod inbound;

pub use inbound::ActionHistoryApi;
