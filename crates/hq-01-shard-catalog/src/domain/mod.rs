//! # Domain Layer
//!
//! Catalog snapshot types and errors.

pub mod catalog;
pub mod errors;
pub mod status;

pub use catalog::{Shard, ShardCatalog};
pub use errors::CatalogError;
pub use status::CatalogStatus;
