//! Request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::JsonMap;

/// Key of the trace receipt inside [`TransactionView::trx`].
pub const RECEIPT_FIELD: &str = "receipt";

/// Key of the submitted envelope inside [`TransactionView::trx`].
pub const ENVELOPE_FIELD: &str = "trx";

/// `get_transaction` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionRequest {
    /// Transaction id.
    #[serde(default)]
    pub id: String,
}

impl GetTransactionRequest {
    /// Request for `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Client-facing transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    /// Requested id.
    pub id: String,
    /// `receipt` (trace receipt map) and, when the envelope is indexed,
    /// `trx` (submitted transaction).
    pub trx: JsonMap,
    /// Block timestamp.
    pub block_time: Value,
    /// Block number.
    pub block_num: Value,
    /// Normalised action traces.
    pub traces: Value,
    /// Stamped by the gateway from the chain node; `null` when unknown.
    #[serde(default)]
    pub last_irreversible_block: Option<Value>,
}

impl TransactionView {
    /// Mutable access to the receipt map, if it is an object.
    pub fn receipt_mut(&mut self) -> Option<&mut JsonMap> {
        self.trx.get_mut(RECEIPT_FIELD).and_then(Value::as_object_mut)
    }

    /// True when the submitted envelope was found.
    pub fn has_envelope(&self) -> bool {
        self.trx.contains_key(ENVELOPE_FIELD)
    }
}
