//! Error types for action paging.

use shared_types::BackendError;
use thiserror::Error;

/// Paging errors. Any of these aborts the request; no partial result is
/// returned.
#[derive(Debug, Error)]
pub enum PagingError {
    /// Counting a shard failed.
    #[error("Count on shard {shard} failed: {source}")]
    Count {
        /// Shard being counted.
        shard: String,
        /// Backend failure.
        #[source]
        source: BackendError,
    },

    /// A whole backend call (multi-search, multi-get) failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A trace subtree could not be re-serialised.
    #[error("Failed to encode action trace: {0}")]
    Encoding(#[from] serde_json::Error),
}
