//! Request and response bodies.

use super::window::{PageRequest, DEFAULT_OFFSET, DEFAULT_POS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on `find_actions` results.
pub const MAX_FIND_ACTIONS_RESULTS: u64 = 100;

/// `get_actions` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetActionsRequest {
    /// Account whose actions (as receiver or authorizer) are listed.
    #[serde(default)]
    pub account_name: String,
    /// Anchor; defaults to [`DEFAULT_POS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<i64>,
    /// Relative window size; defaults to [`DEFAULT_OFFSET`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl GetActionsRequest {
    /// Request with explicit window.
    pub fn new(account_name: impl Into<String>, pos: i64, offset: i64) -> Self {
        Self {
            account_name: account_name.into(),
            pos: Some(pos),
            offset: Some(offset),
        }
    }

    /// Window with defaults applied.
    pub fn page(&self) -> PageRequest {
        PageRequest::new(
            self.pos.unwrap_or(DEFAULT_POS),
            self.offset.unwrap_or(DEFAULT_OFFSET),
        )
    }
}

/// One returned action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    /// Global sequence, in the encoding the backend stored.
    pub global_action_seq: Value,
    /// Position in the account's own history; absent for `find_actions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_action_seq: Option<u64>,
    /// Block number.
    pub block_num: Value,
    /// Block timestamp.
    pub block_time: Value,
    /// Normalised trace subtree rooted at this action; `null` when the
    /// owning transaction trace is unavailable.
    pub action_trace: Value,
}

/// `get_actions` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetActionsResponse {
    /// Actions in requested order.
    pub actions: Vec<ActionEntry>,
    /// Stamped by the gateway from the chain node; `null` when unknown.
    #[serde(default)]
    pub last_irreversible_block: Option<Value>,
}

/// `find_actions` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindActionsRequest {
    /// Text matched against action data.
    #[serde(default)]
    pub data: String,
    /// Restrict to an account (receiver or authorizer). Empty means any.
    #[serde(default)]
    pub account_name: String,
    /// Inclusive lower bound on block time.
    #[serde(default)]
    pub from_date: String,
    /// Inclusive upper bound on block time.
    #[serde(default)]
    pub to_date: String,
    /// Only blocks since the start of the day N days ago.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_days: Option<u32>,
}

/// `find_actions` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindActionsResponse {
    /// Matching actions, ascending by global sequence.
    pub actions: Vec<ActionEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let req: GetActionsRequest =
            serde_json::from_value(json!({ "account_name": "alice" })).unwrap();
        assert_eq!(req.page(), PageRequest::new(-1, -20));
    }

    #[test]
    fn test_entry_omits_missing_account_seq() {
        let entry = ActionEntry {
            global_action_seq: json!("17"),
            account_action_seq: None,
            block_num: json!(5),
            block_time: json!("2018-06-09T12:00:00.000"),
            action_trace: Value::Null,
        };
        let out = serde_json::to_value(&entry).unwrap();
        assert!(out.get("account_action_seq").is_none());
        assert_eq!(out["global_action_seq"], json!("17"));
        assert_eq!(out["action_trace"], Value::Null);
    }

    #[test]
    fn test_response_always_carries_irreversible_block() {
        let out = serde_json::to_value(GetActionsResponse::default()).unwrap();
        assert_eq!(out, json!({ "actions": [], "last_irreversible_block": null }));
    }

    #[test]
    fn test_find_request_optional_fields() {
        let req: FindActionsRequest =
            serde_json::from_value(json!({ "data": "memo", "last_days": 7 })).unwrap();
        assert!(req.account_name.is_empty());
        assert_eq!(req.last_days, Some(7));
    }
}
