//! # HQ-03 Action Paging
//!
//! Cross-shard pagination over one account's action history.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Request Flow
//!
//! ```text
//! (pos, offset) ──normalize──→ PageWindow { order, start, count }
//!                                   │
//!   catalog snapshot ──ordered──→ shards in traversal order
//!                                   │
//!                  count per shard (sequential)
//!                                   │
//!                 plan_fetches ──→ [ShardFetch { from, size }]
//!                                   │
//!                  one multi-search, hits concatenated
//!                                   │
//!         one multi-get of every owning transaction trace
//!                                   │
//!      locate + normalize_subtree per hit, account-relative numbering
//! ```
//!
//! Shards are chronological and each shard's hits arrive sorted, so the
//! concatenation is already in global-sequence order.
//!
//! ## Account-Relative Numbering
//!
//! | Direction | Hit `i` |
//! |-----------|---------|
//! | Ascending | `start + i` |
//! | Descending | `total - (start + i + 1)` |
//!
//! `total` is the sum of all per-shard counts, so the number does not
//! depend on which shard a hit came from.
//!
//! ## Module Structure
//!
//! ```text
//! hq-03-action-paging/
//! ├── domain/          # PageRequest/PageWindow, wire types, PagingError
//! ├── algorithms/      # planner (fetch plan, numbering), stitch (hits → entries)
//! ├── ports/           # ActionHistoryApi (inbound)
//! └── service.rs       # ActionPagingService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{account_action_seq, plan_fetches, FetchPlan, ShardFetch};
pub use domain::{
    ActionEntry, FindActionsRequest, FindActionsResponse, GetActionsRequest, GetActionsResponse,
    PageRequest, PageWindow, PagingError, DEFAULT_OFFSET, DEFAULT_POS, MAX_FIND_ACTIONS_RESULTS,
};
pub use ports::ActionHistoryApi;
pub use service::ActionPagingService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
