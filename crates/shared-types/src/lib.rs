//! # Shared Types Crate
//!
//! Document types for the indexed history streams and the search backend
//! contract shared by every history-query component.
//!
//! ## Design Principles
//!
//! - **Read-only**: documents are written by an external ingestion pipeline.
//!   Nothing here mutates the backend; types only read, reshape and
//!   re-serialize.
//! - **Lossless pass-through**: every document keeps the fields it does not
//!   interpret in a flattened map, so a re-serialized document carries
//!   everything the backend returned.
//! - **One comparable sequence**: global sequence numbers arrive as JSON
//!   numbers or strings and are decoded into [`GlobalSequence`] before any
//!   comparison.

pub mod entities;
pub mod errors;
pub mod search;

pub use entities::*;
pub use errors::*;
pub use search::{
    Filter, GetItem, GetOutcome, GetResult, Query, SearchBackend, SearchRequest, Sort, SortOrder,
    SubSearchResult, GLOBAL_SEQUENCE_FIELD,
};
