//! Health view of the catalog.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Health view of the catalog, served on `/health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStatus {
    /// Generation of the published snapshot.
    pub generation: u64,
    /// Successful refreshes since start.
    pub refreshes: u64,
    /// Failed refreshes since start.
    pub failures: u64,
    /// Time of the last successful refresh.
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Error of the most recent refresh, cleared on success.
    pub last_error: Option<String>,
    /// Shards per stream prefix.
    pub shards: BTreeMap<String, usize>,
}
