//! # Ports
//!
//! Inbound ports are the subsystem APIs the handlers call
//! (`ActionHistoryApi`, `TransactionHistoryApi`, `AccountLookupApi`,
//! `CatalogReader`); the only outbound port owned here is the chain node.

pub mod outbound;

pub use outbound::ChainNode;
