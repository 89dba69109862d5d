//! Error types for transaction assembly.

use shared_types::BackendError;
use thiserror::Error;

/// Assembly errors.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// No trace shard holds the id.
    #[error("Transaction not found.")]
    NotFound {
        /// Requested id.
        id: String,
    },

    /// The trace exists but the transaction was rejected on chain.
    #[error("Transaction not found")]
    HardFailed {
        /// Requested id.
        id: String,
    },

    /// The trace document is not usable.
    #[error("Malformed transaction trace: {0}")]
    MalformedTrace(String),

    /// A whole backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Re-serialisation failed.
    #[error("Failed to encode transaction: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl AssemblyError {
    /// True for the variants clients see as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::HardFailed { .. })
    }
}
