//! # HQ-04 Transaction Assembly
//!
//! Builds the client-facing view of one transaction from its execution
//! trace and, when indexed, its submitted envelope.
//!
//! **Subsystem ID:** 04
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Lookup
//!
//! A single multi-get asks every `transaction_traces` and `transactions`
//! shard for the id. Per stream the newest shard holding it wins. A missing
//! trace means "not found" even if the envelope exists; a `hard_fail`
//! status is reported the same way.
//!
//! ## Output
//!
//! | Field | Source |
//! |-------|--------|
//! | `id` | request |
//! | `trx.receipt` | trace receipt |
//! | `trx.trx` | envelope, `setabi` actions normalised |
//! | `block_num`, `block_time` | trace |
//! | `traces` | trace roots, flattened level-order when any is nested |
//!
//! ## Module Structure
//!
//! ```text
//! hq-04-transaction-assembly/
//! ├── domain/          # TransactionView, GetTransactionRequest, AssemblyError
//! ├── algorithms/      # assemble (pure view construction)
//! ├── ports/           # TransactionHistoryApi (inbound)
//! └── service.rs       # TransactionAssemblyService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{assemble, envelope, normalized_traces};
pub use domain::{
    AssemblyError, GetTransactionRequest, TransactionView, ENVELOPE_FIELD, RECEIPT_FIELD,
};
pub use ports::TransactionHistoryApi;
pub use service::TransactionAssemblyService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
