//! Inbound port: catalog access for request handlers.

use crate::domain::{CatalogStatus, ShardCatalog};
use std::sync::Arc;

/// Read access to the current catalog snapshot.
///
/// A request takes one snapshot at its start and uses it throughout, so a
/// refresh landing mid-request cannot mix two shard lists.
pub trait CatalogReader: Send + Sync {
    /// The snapshot currently published.
    fn snapshot(&self) -> Arc<ShardCatalog>;

    /// Health view. Readers without a refresh loop report the snapshot only.
    fn status(&self) -> CatalogStatus {
        let catalog = self.snapshot();
        CatalogStatus {
            generation: catalog.generation(),
            shards: catalog.shard_counts(),
            ..CatalogStatus::default()
        }
    }
}

// =============================================================================
// STATIC IMPLEMENTATION (for testing)
// =============================================================================

/// Catalog that never changes.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: Arc<ShardCatalog>,
}

impl StaticCatalog {
    /// Serve `catalog` forever.
    pub fn new(catalog: ShardCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl CatalogReader for StaticCatalog {
    fn snapshot(&self) -> Arc<ShardCatalog> {
        Arc::clone(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::StreamKind;

    #[test]
    fn test_static_catalog_returns_same_snapshot() {
        let reader = StaticCatalog::new(ShardCatalog::from_names([(
            StreamKind::Accounts,
            vec!["accounts-0"],
        )]));
        let a = reader.snapshot();
        let b = reader.snapshot();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_static_catalog_status() {
        let reader = StaticCatalog::new(ShardCatalog::from_names([(
            StreamKind::Accounts,
            vec!["accounts-0", "accounts-1"],
        )]));
        let status = reader.status();
        assert_eq!(status.refreshes, 0);
        assert_eq!(status.shards.get("accounts"), Some(&2));
    }
}
