//! # Catalog Snapshot
//!
//! Immutable view of every stream's shard list at one refresh cycle.

use serde::Serialize;
use shared_types::{SortOrder, StreamKind};
use std::collections::BTreeMap;

/// One physical shard of a stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Shard {
    /// Index name, e.g. `action_traces-3`.
    pub name: String,
    /// Numeric suffix; proxy for creation order.
    pub ordinal: u64,
}

impl Shard {
    /// Create a shard descriptor.
    pub fn new(name: impl Into<String>, ordinal: u64) -> Self {
        Self {
            name: name.into(),
            ordinal,
        }
    }
}

/// Shard lists of all streams, published together.
///
/// Within a stream shards are ascending by ordinal. A snapshot is never
/// modified after construction; refreshing builds a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShardCatalog {
    streams: BTreeMap<StreamKind, Vec<Shard>>,
    generation: u64,
}

impl ShardCatalog {
    /// Catalog with no shards.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from per-stream lists, sorting each by ordinal.
    pub fn from_streams(mut streams: BTreeMap<StreamKind, Vec<Shard>>) -> Self {
        for shards in streams.values_mut() {
            shards.sort_by(|a, b| a.ordinal.cmp(&b.ordinal).then_with(|| a.name.cmp(&b.name)));
            shards.dedup_by(|a, b| a.name == b.name);
        }
        Self {
            streams,
            generation: 0,
        }
    }

    /// Build from `(stream, shard names)` pairs. Names are expected to be
    /// `<prefix>-<digits>`; others are ignored.
    pub fn from_names<'a>(
        entries: impl IntoIterator<Item = (StreamKind, Vec<&'a str>)>,
    ) -> Self {
        let mut streams: BTreeMap<StreamKind, Vec<Shard>> = BTreeMap::new();
        for (kind, names) in entries {
            let shards = streams.entry(kind).or_default();
            for name in names {
                if let Some((parsed, ordinal)) = crate::algorithms::parse_shard_name(name) {
                    if parsed == kind {
                        shards.push(Shard::new(name, ordinal));
                    }
                }
            }
        }
        Self::from_streams(streams)
    }

    /// Same catalog stamped with a refresh generation.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Refresh cycle that produced this snapshot (0 = never refreshed).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shards of a stream, ascending.
    pub fn shards(&self, kind: StreamKind) -> &[Shard] {
        self.streams.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shard names of a stream, ascending.
    pub fn shard_names(&self, kind: StreamKind) -> Vec<&str> {
        self.shards(kind).iter().map(|s| s.name.as_str()).collect()
    }

    /// Shards of a stream in traversal order: low to high for ascending
    /// reads, high to low for descending reads.
    pub fn ordered(&self, kind: StreamKind, order: SortOrder) -> Vec<&Shard> {
        let shards = self.shards(kind);
        match order {
            SortOrder::Ascending => shards.iter().collect(),
            SortOrder::Descending => shards.iter().rev().collect(),
        }
    }

    /// Number of shards per stream.
    pub fn shard_counts(&self) -> BTreeMap<String, usize> {
        StreamKind::ALL
            .iter()
            .map(|kind| (kind.prefix().to_string(), self.shards(*kind).len()))
            .collect()
    }

    /// True when no stream has any shard.
    pub fn is_empty(&self) -> bool {
        self.streams.values().all(Vec::is_empty)
    }
}
