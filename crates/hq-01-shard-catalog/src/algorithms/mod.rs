//! # Algorithms
//!
//! Pure functions over backend responses.

pub mod listing;

pub use listing::{parse_index_listing, parse_shard_name};
