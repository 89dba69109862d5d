//! # Adapters

pub mod chain_node;
pub mod error_conversions;

pub use chain_node::StaticChainNode;
