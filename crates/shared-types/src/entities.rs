//! # Core Domain Entities
//!
//! Documents stored in the four indexed streams.
//!
//! ## Clusters
//!
//! - **Catalog**: `StreamKind`
//! - **Actions**: `ActionTraceDoc`, `ActionReceipt`, `ActionPayload`
//! - **Transactions**: `TransactionTraceDoc`, `ActionTraceNode`, `TransactionDoc`
//! - **Accounts**: `AccountDoc`

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Free-form JSON object used for pass-through fields.
pub type JsonMap = serde_json::Map<String, Value>;

// =============================================================================
// CLUSTER A: THE CATALOG
// =============================================================================

/// Logical stream of documents, physically split into numbered shards
/// (`action_traces-0`, `action_traces-1`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Account documents (`accounts-N`).
    Accounts,
    /// Submitted transaction envelopes (`transactions-N`).
    Transactions,
    /// Transaction execution traces (`transaction_traces-N`).
    TransactionTraces,
    /// Flat action traces, one row per receipt (`action_traces-N`).
    ActionTraces,
}

impl StreamKind {
    /// Every stream the catalog tracks.
    pub const ALL: [StreamKind; 4] = [
        StreamKind::Accounts,
        StreamKind::Transactions,
        StreamKind::TransactionTraces,
        StreamKind::ActionTraces,
    ];

    /// Index name prefix of this stream's shards.
    pub fn prefix(&self) -> &'static str {
        match self {
            StreamKind::Accounts => "accounts",
            StreamKind::Transactions => "transactions",
            StreamKind::TransactionTraces => "transaction_traces",
            StreamKind::ActionTraces => "action_traces",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// =============================================================================
// CLUSTER B: SEQUENCE NUMBERS
// =============================================================================

/// Backend-wide monotonically increasing action identifier.
///
/// Totally orders every action and is the merge key across shards. The
/// backend returns it either as a JSON number or as a decimal string; both
/// decode to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GlobalSequence(pub u64);

impl GlobalSequence {
    /// Decode from either JSON encoding. Returns `None` for anything that is
    /// not a non-negative integer.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                        .map(|f| f as u64)
                })
                .map(Self),
            Value::String(s) => s.trim().parse().ok().map(Self),
            _ => None,
        }
    }

    /// Raw value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GlobalSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for GlobalSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        GlobalSequence::from_json(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid global sequence: {}", raw)))
    }
}

/// Reads an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// CLUSTER C: ACTIONS
// =============================================================================

/// Account that publishes the system contract.
pub const SYSTEM_ACCOUNT: &str = "eosio";

/// System action that installs a contract ABI.
pub const SET_ABI_ACTION: &str = "setabi";

/// Action payload (`act`) as stored in traces and transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPayload {
    /// Contract account.
    #[serde(default)]
    pub account: String,
    /// Action name.
    #[serde(default)]
    pub name: String,
    /// Authorization list, passed through untouched.
    #[serde(default)]
    pub authorization: Value,
    /// Decoded action data.
    #[serde(default)]
    pub data: Value,
    /// Hex encoding of the raw action data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_data: Option<String>,
    /// Fields not interpreted here.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl ActionPayload {
    /// True for the system contract's ABI installation action.
    pub fn is_set_abi(&self) -> bool {
        self.account == SYSTEM_ACCOUNT && self.name == SET_ABI_ACTION
    }
}

/// Receipt of a flat action trace row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReceipt {
    /// Account whose code ran.
    #[serde(default)]
    pub receiver: String,
    /// Merge key across shards.
    pub global_sequence: GlobalSequence,
    /// `act_digest`, `recv_sequence`, `auth_sequence`, `code_sequence`,
    /// `abi_sequence`, ...
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// One row of the `action_traces` stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTraceDoc {
    /// Execution receipt.
    pub receipt: ActionReceipt,
    /// The action itself.
    #[serde(default)]
    pub act: ActionPayload,
    /// Owning transaction id.
    #[serde(default)]
    pub trx_id: String,
    /// Block the action was included in.
    #[serde(default)]
    pub block_num: Value,
    /// Timestamp of that block.
    #[serde(default)]
    pub block_time: Value,
    /// Present when the action raised an exception.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<Value>,
    /// Fields not interpreted here.
    #[serde(flatten)]
    pub extra: JsonMap,
}

// =============================================================================
// CLUSTER D: TRANSACTIONS
// =============================================================================

/// Node of a transaction's action trace tree.
///
/// Children are the inline actions this action triggered. The tree is
/// finite and acyclic; global sequences are unique across it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionTraceNode {
    /// Free-form receipt; carries this node's `global_sequence`.
    #[serde(default)]
    pub receipt: Value,
    /// Action payload.
    #[serde(default)]
    pub act: ActionPayload,
    /// Inline child traces.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inline_traces: Vec<ActionTraceNode>,
    /// Fields not interpreted here.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl ActionTraceNode {
    /// Global sequence from the receipt, normalised from either encoding.
    pub fn global_sequence(&self) -> Option<GlobalSequence> {
        self.receipt
            .get("global_sequence")
            .and_then(GlobalSequence::from_json)
    }
}

/// Execution status recorded in a transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Succeeded.
    Executed,
    /// Objectively failed, error handler executed.
    SoftFail,
    /// Objectively failed and rejected; not canonical history.
    HardFail,
    /// Scheduled for later execution.
    Delayed,
    /// Expired before execution.
    Expired,
    /// Any status this service does not interpret.
    Other(String),
}

impl TransactionStatus {
    /// Parse the receipt's textual status.
    pub fn parse(status: &str) -> Self {
        match status {
            "executed" => Self::Executed,
            "soft_fail" => Self::SoftFail,
            "hard_fail" => Self::HardFail,
            "delayed" => Self::Delayed,
            "expired" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One row of the `transaction_traces` stream, keyed by transaction id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTraceDoc {
    /// Transaction id.
    #[serde(default)]
    pub id: String,
    /// Block the transaction was included in.
    #[serde(default)]
    pub block_num: Value,
    /// Timestamp of that block.
    #[serde(default)]
    pub block_time: Value,
    /// Free-form receipt map; carries `status`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub receipt: JsonMap,
    /// Top-level action traces.
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_traces: Vec<ActionTraceNode>,
    /// Fields not interpreted here.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl TransactionTraceDoc {
    /// Status from the receipt, `None` when absent or not a string.
    pub fn status(&self) -> Option<TransactionStatus> {
        self.receipt
            .get("status")
            .and_then(Value::as_str)
            .map(TransactionStatus::parse)
    }
}

/// One row of the `transactions` stream: the submitted envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionDoc {
    /// Expiration time.
    #[serde(default)]
    pub expiration: Value,
    /// TaPoS reference block number.
    #[serde(default)]
    pub ref_block_num: Value,
    /// TaPoS reference block prefix.
    #[serde(default)]
    pub ref_block_prefix: Value,
    /// Net usage limit.
    #[serde(default)]
    pub max_net_usage_words: Value,
    /// CPU usage limit.
    #[serde(default)]
    pub max_cpu_usage_ms: Value,
    /// Delay in seconds.
    #[serde(default)]
    pub delay_sec: Value,
    /// Context-free actions.
    #[serde(default)]
    pub context_free_actions: Value,
    /// Actions with decoded and hex data, kept raw until normalised.
    #[serde(default)]
    pub actions: Value,
    /// Transaction extensions.
    #[serde(default)]
    pub transaction_extensions: Value,
    /// Signatures.
    #[serde(default)]
    pub signatures: Value,
    /// Context-free data.
    #[serde(default)]
    pub context_free_data: Value,
    /// `trx_id`, `block_id`, `irreversible`, `signing_keys`, ...
    #[serde(flatten)]
    pub extra: JsonMap,
}

// =============================================================================
// CLUSTER E: ACCOUNTS
// =============================================================================

/// One row of the `accounts` stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountDoc {
    /// Account name.
    pub name: String,
    /// `creator`, `pub_keys`, `account_controls`, `abi`, ...
    #[serde(flatten)]
    pub extra: JsonMap,
}
