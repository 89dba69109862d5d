//! # Index Listing Parser
//!
//! The backend answers `_cat/indices` with a whitespace-separated table, one
//! index per line. Only the index-name column carries information we need,
//! and a shard name is recognizable on its own: `<prefix>-<digits>` for one
//! of the four stream prefixes. Every other token (health, uuid, counts,
//! sizes, foreign indices) is ignored.

use crate::domain::{Shard, ShardCatalog};
use shared_types::StreamKind;
use std::collections::BTreeMap;

/// Split a shard name into its stream and ordinal.
///
/// Returns `None` unless the name is exactly `<prefix>-<one or more digits>`.
pub fn parse_shard_name(name: &str) -> Option<(StreamKind, u64)> {
    StreamKind::ALL.iter().find_map(|kind| {
        let digits = name.strip_prefix(kind.prefix())?.strip_prefix('-')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(|ordinal| (*kind, ordinal))
    })
}

/// Build a catalog from a raw index listing.
pub fn parse_index_listing(listing: &str) -> ShardCatalog {
    let mut streams: BTreeMap<StreamKind, Vec<Shard>> = BTreeMap::new();

    for token in listing.split_whitespace() {
        if let Some((kind, ordinal)) = parse_shard_name(token) {
            streams
                .entry(kind)
                .or_default()
                .push(Shard::new(token, ordinal));
        }
    }

    ShardCatalog::from_streams(streams)
}
