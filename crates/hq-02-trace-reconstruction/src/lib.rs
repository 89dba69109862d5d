//! # HQ-02 Trace Reconstruction
//!
//! Stateless operations on a single transaction trace's action tree.
//!
//! **Subsystem ID:** 02
//!
//! ## Operations
//!
//! | Operation | Purpose |
//! |-----------|---------|
//! | [`locate`] | Find the node carrying a given global sequence |
//! | [`expand`] | A node plus all its descendants, level order |
//! | [`normalize`] | Restore the raw ABI of a `setabi` action |
//! | [`normalize_subtree`] | `normalize` applied to every node of `expand` |
//! | [`flatten`] | Owned level-order copy of a whole trace forest |
//!
//! All traversals visit the oldest pending node first and enqueue its
//! inline children at the back, stopping below [`MAX_TRACE_DEPTH`].
//! Global sequences are compared after decoding, so `"42"` and `42` match.
//!
//! ## Module Structure
//!
//! ```text
//! hq-02-trace-reconstruction/
//! ├── domain/          # Depth bound, ABI payload constants
//! └── algorithms/
//!     ├── traversal.rs # locate, expand, flatten
//!     └── abi.rs       # normalize, normalize_subtree
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::{
    expand, flatten, has_inline_traces, locate, normalize, normalize_action, normalize_subtree,
};
pub use domain::{ABI_FIELD, ABI_HEX_PREFIX_LEN, MAX_TRACE_DEPTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
