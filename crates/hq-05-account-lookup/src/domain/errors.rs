//! Error types for account lookups.

use shared_types::BackendError;
use thiserror::Error;

/// Lookup errors.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The multi-search call failed as a whole.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Every shard failed; there is nothing to answer with.
    #[error("Failed to parse ES response")]
    AllShardsFailed,

    /// A matching hit is not an account document.
    #[error("Failed to parse ES response")]
    UndecodableAccount {
        /// Shard the hit came from.
        shard: String,
        /// Decoder message.
        reason: String,
    },
}
