//! Chain-node payloads and the packed-transaction locator.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// `get_info` response; only the irreversible head is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Last irreversible block number.
    pub last_irreversible_block_num: Value,
    /// Everything else the node reports.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a block's transaction list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockTransaction {
    /// Either the bare id or the packed transaction object.
    #[serde(default)]
    pub trx: Value,
    /// Receipt fields (`status`, usage, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `get_block` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainBlock {
    /// Included transactions.
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
    /// Header and everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const PACKED_FIELDS: [&str; 4] = [
    "signatures",
    "compression",
    "packed_context_free_data",
    "packed_trx",
];

/// The tagged receipt reference of transaction `id` within `block`:
/// `[0, "<id>"]` when the block lists it by id, `[1, {packed fields}]` when
/// it carries the packed transaction. `None` if the block does not hold it.
pub fn packed_reference(block: &ChainBlock, id: &str) -> Option<Value> {
    block.transactions.iter().find_map(|entry| match &entry.trx {
        Value::String(trx_id) if trx_id == id => Some(json!([0, trx_id])),
        Value::Object(packed) if packed.get("id").and_then(Value::as_str) == Some(id) => {
            let fields: Map<String, Value> = PACKED_FIELDS
                .iter()
                .filter_map(|key| packed.get(*key).map(|v| (key.to_string(), v.clone())))
                .collect();
            Some(json!([1, fields]))
        }
        _ => None,
    })
}
