//! # Domain Layer
//!
//! Limits that apply to every traversal.

/// Nodes deeper than this (roots are depth 0) are not visited.
///
/// Execution trees are acyclic and shallow in practice; the bound keeps a
/// malformed document from driving an unbounded walk.
pub const MAX_TRACE_DEPTH: usize = 1024;

/// Length of the serialisation header in front of the raw ABI bytes in a
/// `setabi` action's hex payload.
pub const ABI_HEX_PREFIX_LEN: usize = 20;

/// Field of a `setabi` action's data that receives the raw ABI.
pub const ABI_FIELD: &str = "abi";
