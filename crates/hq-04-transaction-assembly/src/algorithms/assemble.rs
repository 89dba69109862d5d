//! Transaction view assembly.
//!
//! The trace document is authoritative: it decides existence, status,
//! block and traces. The submitted envelope only contributes `trx.trx`.

use crate::domain::{AssemblyError, TransactionView, ENVELOPE_FIELD, RECEIPT_FIELD};
use hq_02_trace_reconstruction::{flatten, has_inline_traces, normalize_action, normalize_subtree};
use serde_json::Value;
use shared_types::{
    ActionPayload, ActionTraceNode, JsonMap, TransactionDoc, TransactionStatus,
    TransactionTraceDoc,
};
use tracing::debug;

/// Normalise every node; when any root has inline children, return the
/// level-order expansion of all roots instead of the roots alone.
pub fn normalized_traces(mut roots: Vec<ActionTraceNode>) -> Vec<ActionTraceNode> {
    for root in roots.iter_mut() {
        normalize_subtree(root);
    }
    if has_inline_traces(&roots) {
        flatten(&roots)
    } else {
        roots
    }
}

/// `actions` with every `setabi` normalised. A list that does not decode
/// as actions is returned unchanged.
pub fn normalized_actions(actions: Value) -> Result<Value, serde_json::Error> {
    match serde_json::from_value::<Vec<ActionPayload>>(actions.clone()) {
        Ok(mut decoded) => {
            for action in decoded.iter_mut() {
                normalize_action(action);
            }
            serde_json::to_value(decoded)
        }
        Err(error) => {
            debug!(%error, "Envelope actions left undecoded");
            Ok(actions)
        }
    }
}

/// The client-facing `trx.trx` object, with `setabi` actions normalised.
pub fn envelope(transaction: TransactionDoc) -> Result<JsonMap, serde_json::Error> {
    let actions = normalized_actions(transaction.actions)?;

    let mut trx = JsonMap::new();
    trx.insert("expiration".into(), transaction.expiration);
    trx.insert("ref_block_num".into(), transaction.ref_block_num);
    trx.insert("ref_block_prefix".into(), transaction.ref_block_prefix);
    trx.insert("max_net_usage_words".into(), transaction.max_net_usage_words);
    trx.insert("max_cpu_usage_ms".into(), transaction.max_cpu_usage_ms);
    trx.insert("delay_sec".into(), transaction.delay_sec);
    trx.insert("context_free_actions".into(), transaction.context_free_actions);
    trx.insert("actions".into(), actions);
    trx.insert(
        "transaction_extensions".into(),
        transaction.transaction_extensions,
    );
    trx.insert("signatures".into(), transaction.signatures);
    trx.insert("context_free_data".into(), transaction.context_free_data);
    Ok(trx)
}

/// Build the view for `id` from its trace and, if indexed, its envelope.
pub fn assemble(
    id: &str,
    trace: TransactionTraceDoc,
    transaction: Option<TransactionDoc>,
) -> Result<TransactionView, AssemblyError> {
    match trace.status() {
        None => {
            return Err(AssemblyError::MalformedTrace(
                "receipt.status is missing or not a string".into(),
            ))
        }
        Some(TransactionStatus::HardFail) => {
            return Err(AssemblyError::HardFailed { id: id.to_string() })
        }
        Some(_) => {}
    }

    let traces = serde_json::to_value(normalized_traces(trace.action_traces))?;

    let mut trx = JsonMap::new();
    trx.insert(RECEIPT_FIELD.into(), Value::Object(trace.receipt));
    if let Some(transaction) = transaction {
        trx.insert(ENVELOPE_FIELD.into(), Value::Object(envelope(transaction)?));
    }

    Ok(TransactionView {
        id: id.to_string(),
        trx,
        block_time: trace.block_time,
        block_num: trace.block_num,
        traces,
        last_irreversible_block: None,
    })
}
