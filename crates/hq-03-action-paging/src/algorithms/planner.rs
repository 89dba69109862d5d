//! # Fetch Planning
//!
//! Shards are laid end to end in traversal order; shard `k` covers the
//! logical positions `[s_k, s_k + count_k)` where `s_k` is the sum of the
//! earlier counts. A window `[start, end)` then intersects each shard in at
//! most one contiguous range, which becomes that shard's `from`/`size`:
//!
//! ```text
//! from = max(start, s_k) - s_k
//! size = min(end, s_k + count_k) - max(start, s_k)
//! ```
//!
//! Shards with an empty intersection are not queried.

use crate::domain::PageWindow;
use shared_types::SortOrder;

/// Query against one shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardFetch {
    /// Shard name.
    pub shard: String,
    /// Hits to skip within the shard, in traversal order.
    pub from: u64,
    /// Hits to take.
    pub size: u64,
    /// Position of this fetch's first hit relative to the window start.
    pub window_offset: u64,
}

/// Result of planning a window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    /// Sum of all shard counts: the account's total matching actions.
    pub total: u64,
    /// Fetches in traversal order.
    pub fetches: Vec<ShardFetch>,
}

impl FetchPlan {
    /// Number of hits the plan will fetch.
    pub fn fetched(&self) -> u64 {
        self.fetches.iter().map(|f| f.size).sum()
    }
}

/// Plan fetches for `window` over `counts`, given in traversal order.
pub fn plan_fetches(window: &PageWindow, counts: &[(String, u64)]) -> FetchPlan {
    let total = counts
        .iter()
        .fold(0u64, |acc, (_, count)| acc.saturating_add(*count));

    let start = window.start;
    let end = window.end();
    let mut fetches = Vec::new();
    let mut shard_start = 0u64;

    for (shard, count) in counts {
        let shard_end = shard_start.saturating_add(*count);
        let lo = start.max(shard_start);
        let hi = end.min(shard_end);
        if lo < hi {
            fetches.push(ShardFetch {
                shard: shard.clone(),
                from: lo - shard_start,
                size: hi - lo,
                window_offset: lo - start,
            });
        }
        if shard_end >= end {
            break;
        }
        shard_start = shard_end;
    }

    FetchPlan { total, fetches }
}

/// Account-relative sequence of the hit at `position` (0-based, relative
/// to the window start).
///
/// Ascending: `start + position`. Descending: `total - (start + position + 1)`.
pub fn account_action_seq(window: &PageWindow, total: u64, position: u64) -> Option<u64> {
    let logical = window.start.checked_add(position)?;
    match window.order {
        SortOrder::Ascending => Some(logical),
        SortOrder::Descending => total.checked_sub(logical.checked_add(1)?),
    }
}
