//! # Ports
//!
//! - `inbound`: how request handlers read the catalog.
//! - Outbound: the catalog lists shards through
//!   [`shared_types::SearchBackend::list_shards`].

pub mod inbound;

pub use inbound::{CatalogReader, StaticCatalog};
