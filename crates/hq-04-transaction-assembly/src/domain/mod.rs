//! # Domain Layer

pub mod errors;
pub mod types;

pub use errors::AssemblyError;
pub use types::{GetTransactionRequest, TransactionView, ENVELOPE_FIELD, RECEIPT_FIELD};
