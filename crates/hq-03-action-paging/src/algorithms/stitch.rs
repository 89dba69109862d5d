//! Hit decoding and trace payload rendering.

use crate::domain::ActionEntry;
use hq_02_trace_reconstruction::{locate, normalize_subtree};
use serde_json::Value;
use shared_types::{ActionTraceDoc, GlobalSequence, TransactionTraceDoc};
use std::collections::{HashMap, HashSet};

/// One action trace row returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionHit {
    /// Decoded merge key.
    pub global_sequence: GlobalSequence,
    /// Merge key exactly as stored.
    pub raw_global_sequence: Value,
    /// Owning transaction.
    pub trx_id: String,
    /// Block number.
    pub block_num: Value,
    /// Block timestamp.
    pub block_time: Value,
}

impl ActionHit {
    /// Decode a hit source. `None` if it is not an action trace row.
    pub fn from_source(source: Value) -> Option<Self> {
        let raw_global_sequence = source.get("receipt")?.get("global_sequence")?.clone();
        let doc: ActionTraceDoc = serde_json::from_value(source).ok()?;
        Some(Self {
            global_sequence: doc.receipt.global_sequence,
            raw_global_sequence,
            trx_id: doc.trx_id,
            block_num: doc.block_num,
            block_time: doc.block_time,
        })
    }

    /// Build the response entry.
    pub fn into_entry(self, account_action_seq: Option<u64>, action_trace: Value) -> ActionEntry {
        ActionEntry {
            global_action_seq: self.raw_global_sequence,
            account_action_seq,
            block_num: self.block_num,
            block_time: self.block_time,
            action_trace,
        }
    }
}

/// Owning transaction ids in first-seen order, without duplicates or blanks.
pub fn distinct_trx_ids<'a>(hits: impl IntoIterator<Item = &'a ActionHit>) -> Vec<String> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| !hit.trx_id.is_empty())
        .filter(|hit| seen.insert(hit.trx_id.as_str()))
        .map(|hit| hit.trx_id.clone())
        .collect()
}

/// The normalised subtree rooted at `hit`'s node within its owning trace,
/// or `null` when the trace or the node is not available.
pub fn render_action_trace(
    traces: &HashMap<String, TransactionTraceDoc>,
    hit: &ActionHit,
) -> Result<Value, serde_json::Error> {
    let Some(node) = traces
        .get(&hit.trx_id)
        .and_then(|trace| locate(&trace.action_traces, hit.global_sequence))
    else {
        return Ok(Value::Null);
    };

    let mut node = node.clone();
    normalize_subtree(&mut node);
    serde_json::to_value(&node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit_source(seq: Value, trx: &str) -> Value {
        json!({
            "receipt": { "receiver": "alice", "global_sequence": seq },
            "act": { "account": "eosio.token", "name": "transfer", "data": {} },
            "trx_id": trx,
            "block_num": 10,
            "block_time": "2018-06-09T12:00:00.000"
        })
    }

    fn trace_doc() -> TransactionTraceDoc {
        serde_json::from_value(json!({
            "id": "t1",
            "receipt": { "status": "executed" },
            "action_traces": [{
                "receipt": { "global_sequence": 100 },
                "act": { "account": "eosio", "name": "newaccount", "data": {} },
                "inline_traces": [{
                    "receipt": { "global_sequence": "101" },
                    "act": {
                        "account": "eosio",
                        "name": "setabi",
                        "data": { "abi": { "version": "x" } },
                        "hex_data": "00000000000000000000abcdef"
                    },
                    "inline_traces": []
                }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_hit_keeps_raw_sequence_encoding() {
        let hit = ActionHit::from_source(hit_source(json!("101"), "t1")).unwrap();
        assert_eq!(hit.global_sequence, GlobalSequence(101));
        assert_eq!(hit.raw_global_sequence, json!("101"));
        assert_eq!(hit.trx_id, "t1");
    }

    #[test]
    fn test_non_action_source_rejected() {
        assert!(ActionHit::from_source(json!({ "name": "alice" })).is_none());
        assert!(ActionHit::from_source(hit_source(json!("abc"), "t1")).is_none());
    }

    #[test]
    fn test_distinct_trx_ids_preserve_order() {
        let hits: Vec<ActionHit> = [("t2", 1), ("t1", 2), ("t2", 3), ("", 4)]
            .iter()
            .filter_map(|(trx, seq)| ActionHit::from_source(hit_source(json!(seq), trx)))
            .collect();
        assert_eq!(distinct_trx_ids(&hits), vec!["t2".to_string(), "t1".to_string()]);
    }

    #[test]
    fn test_render_normalises_located_subtree() {
        let mut traces = HashMap::new();
        traces.insert("t1".to_string(), trace_doc());
        let hit = ActionHit::from_source(hit_source(json!(101), "t1")).unwrap();

        let rendered = render_action_trace(&traces, &hit).unwrap();
        assert_eq!(rendered["receipt"]["global_sequence"], json!("101"));
        assert_eq!(rendered["act"]["data"]["abi"], json!("abcdef"));
    }

    #[test]
    fn test_render_missing_trace_is_null() {
        let traces = HashMap::new();
        let hit = ActionHit::from_source(hit_source(json!(100), "t1")).unwrap();
        assert_eq!(render_action_trace(&traces, &hit).unwrap(), Value::Null);

        let mut traces = HashMap::new();
        traces.insert("t1".to_string(), trace_doc());
        let hit = ActionHit::from_source(hit_source(json!(999), "t1")).unwrap();
        assert_eq!(render_action_trace(&traces, &hit).unwrap(), Value::Null);
    }
}
