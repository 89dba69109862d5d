//! Raw ABI restoration.
//!
//! The indexer stores a `setabi` action's `data.abi` as parsed JSON. Clients
//! expect the raw bytes, which are the action's hex payload after a fixed
//! serialisation header. Replacing (not appending) keeps the transform
//! idempotent.

use crate::domain::{ABI_FIELD, ABI_HEX_PREFIX_LEN, MAX_TRACE_DEPTH};
use serde_json::Value;
use shared_types::{ActionPayload, ActionTraceNode};
use std::collections::VecDeque;

/// Restore the raw ABI of one action. Returns whether the action changed.
///
/// Only the system `setabi` action with a hex payload of at least
/// [`ABI_HEX_PREFIX_LEN`] characters and object-shaped data is touched.
pub fn normalize_action(act: &mut ActionPayload) -> bool {
    if !act.is_set_abi() {
        return false;
    }
    let Some(raw) = act
        .hex_data
        .as_deref()
        .and_then(|hex| hex.get(ABI_HEX_PREFIX_LEN..))
        .map(str::to_owned)
    else {
        return false;
    };
    let Value::Object(data) = &mut act.data else {
        return false;
    };
    data.insert(ABI_FIELD.to_string(), Value::String(raw));
    true
}

/// Restore the raw ABI of a single node's action.
pub fn normalize(node: &mut ActionTraceNode) -> bool {
    normalize_action(&mut node.act)
}

/// [`normalize`] every node of `node`'s expansion. Returns how many changed.
pub fn normalize_subtree(node: &mut ActionTraceNode) -> usize {
    let mut changed = 0;
    let mut queue: VecDeque<(&mut ActionTraceNode, usize)> = VecDeque::from([(node, 0)]);

    while let Some((current, depth)) = queue.pop_front() {
        if normalize(current) {
            changed += 1;
        }
        if depth < MAX_TRACE_DEPTH {
            queue.extend(
                current
                    .inline_traces
                    .iter_mut()
                    .map(|child| (child, depth + 1)),
            );
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const HEX: &str = "0000000000ea30550e0e656f73696f3a3a6162692f312e31";

    fn setabi(hex: Option<&str>, data: Value) -> ActionPayload {
        ActionPayload {
            account: "eosio".into(),
            name: "setabi".into(),
            data,
            hex_data: hex.map(str::to_string),
            ..Default::default()
        }
    }

    fn node_with(act: ActionPayload, children: Vec<ActionTraceNode>) -> ActionTraceNode {
        ActionTraceNode {
            act,
            inline_traces: children,
            ..Default::default()
        }
    }

    #[test]
    fn test_setabi_replaced_with_raw_bytes() {
        let mut act = setabi(
            Some(HEX),
            json!({ "account": "token", "abi": { "version": "eosio::abi/1.1" } }),
        );
        assert!(normalize_action(&mut act));
        assert_eq!(act.data["abi"], json!(&HEX[20..]));
        assert_eq!(act.data["account"], json!("token"));
    }

    #[test]
    fn test_short_payload_untouched() {
        let original = setabi(Some("0123456789"), json!({ "abi": { "x": 1 } }));
        let mut act = original.clone();
        assert!(!normalize_action(&mut act));
        assert_eq!(act, original);
    }

    #[test]
    fn test_exact_prefix_length_gives_empty_abi() {
        let mut act = setabi(Some("01234567890123456789"), json!({}));
        assert!(normalize_action(&mut act));
        assert_eq!(act.data["abi"], json!(""));
    }

    #[test]
    fn test_other_actions_untouched() {
        let mut act = setabi(Some(HEX), json!({ "abi": {} }));
        act.name = "setcode".into();
        assert!(!normalize_action(&mut act));

        let mut act = setabi(Some(HEX), json!({ "abi": {} }));
        act.account = "notsystem".into();
        assert!(!normalize_action(&mut act));
    }

    #[test]
    fn test_missing_hex_or_non_object_data_untouched() {
        let mut act = setabi(None, json!({ "abi": {} }));
        assert!(!normalize_action(&mut act));

        let mut act = setabi(Some(HEX), json!("opaque"));
        assert!(!normalize_action(&mut act));
        assert_eq!(act.data, json!("opaque"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = setabi(Some(HEX), json!({ "abi": { "v": 1 } }));
        normalize_action(&mut once);
        let mut twice = once.clone();
        normalize_action(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_subtree_reaches_descendants() {
        let plain = ActionPayload {
            account: "token".into(),
            name: "transfer".into(),
            ..Default::default()
        };
        let mut root = node_with(
            plain.clone(),
            vec![node_with(
                plain,
                vec![node_with(setabi(Some(HEX), json!({})), vec![])],
            )],
        );

        assert_eq!(normalize_subtree(&mut root), 1);
        let leaf = &root.inline_traces[0].inline_traces[0];
        assert_eq!(leaf.act.data["abi"], json!(&HEX[20..]));
    }

    proptest! {
        #[test]
        fn prop_abi_is_suffix_after_prefix(hex in "[0-9a-f]{0,80}") {
            let mut act = setabi(Some(hex.as_str()), json!({ "abi": { "k": "v" } }));
            let changed = normalize_action(&mut act);
            if hex.len() >= ABI_HEX_PREFIX_LEN {
                prop_assert!(changed);
                prop_assert_eq!(act.data["abi"].as_str(), Some(&hex[ABI_HEX_PREFIX_LEN..]));
            } else {
                prop_assert!(!changed);
                prop_assert_eq!(&act.data["abi"], &json!({ "k": "v" }));
            }
        }
    }
}
