//! # Algorithms
//!
//! - `traversal`: level-order search and expansion of trace trees
//! - `abi`: raw ABI restoration for `setabi` actions

pub mod abi;
pub mod traversal;

pub use abi::{normalize, normalize_action, normalize_subtree};
pub use traversal::{expand, flatten, has_inline_traces, locate};
