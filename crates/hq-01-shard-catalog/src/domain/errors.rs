//! Error types for the shard catalog.

use shared_types::BackendError;
use thiserror::Error;

/// Catalog errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The index listing could not be fetched; the previous snapshot stays
    /// published.
    #[error("Index listing failed: {0}")]
    ListingFailed(#[from] BackendError),
}
