//! Request and response bodies.

use serde::{Deserialize, Serialize};

/// Hits requested from each accounts shard.
pub const MAX_QUERY_SIZE: u64 = 10_000;

/// `get_key_accounts` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetKeyAccountsRequest {
    /// Public key to look for.
    #[serde(default)]
    pub public_key: String,
}

/// `get_key_accounts` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetKeyAccountsResponse {
    /// Sorted account names.
    pub account_names: Vec<String>,
}

/// `get_controlled_accounts` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetControlledAccountsRequest {
    /// Controlling account.
    #[serde(default)]
    pub controlling_account: String,
}

/// `get_controlled_accounts` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetControlledAccountsResponse {
    /// Sorted account names.
    pub controlled_accounts: Vec<String>,
}
