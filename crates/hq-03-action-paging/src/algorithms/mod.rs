//! # Algorithms
//!
//! - `planner`: per-shard `from`/`size` for a window, account-relative numbering
//! - `stitch`: hit decoding and trace payload rendering

pub mod planner;
pub mod stitch;

pub use planner::{account_action_seq, plan_fetches, FetchPlan, ShardFetch};
pub use stitch::{distinct_trx_ids, render_action_trace, ActionHit};
