//! # Algorithms

pub mod assemble;

pub use assemble::{assemble, envelope, normalized_traces};
