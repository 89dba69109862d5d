//! # Search Backend Contract
//!
//! The generic query/count/multi-get contract every component consumes.
//! The backend's engine is not reimplemented here; production code talks
//! to it through an HTTP adapter, tests through [`memory::InMemorySearchBackend`].
//!
//! Queries are expressed as a conjunction of [`Filter`]s so that each
//! adapter can translate them into its own query language.

pub mod memory;

use crate::errors::BackendError;
use async_trait::async_trait;
use serde_json::Value;

/// Field holding the merge key of action trace rows.
pub const GLOBAL_SEQUENCE_FIELD: &str = "receipt.global_sequence";

/// One filter clause. A [`Query`] matches documents satisfying all clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `receipt.receiver` or any `act.authorization.actor` equals the account.
    AccountActivity(String),
    /// Document has no `except` field.
    NotExceptional,
    /// Any `pub_keys.key` equals the key.
    PublicKey(String),
    /// Any `account_controls.name` equals the account.
    ControllingAccount(String),
    /// `act.data` matches the text.
    ActionData(String),
    /// `block_time` within the inclusive bounds.
    BlockTimeRange {
        /// Lower bound, inclusive.
        from: Option<String>,
        /// Upper bound, inclusive.
        to: Option<String>,
    },
    /// `block_time` on or after the start of the day N days ago.
    RecentDays(u32),
}

/// Conjunction of filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Clauses, all of which must match.
    pub filters: Vec<Filter>,
}

impl Query {
    /// Empty query matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Activity of one account, ignoring exceptional documents.
    pub fn account_actions(account: &str) -> Self {
        Self::new()
            .filter(Filter::AccountActivity(account.to_string()))
            .filter(Filter::NotExceptional)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Low to high.
    Ascending,
    /// High to low.
    Descending,
}

impl SortOrder {
    /// True for [`SortOrder::Ascending`].
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }
}

/// Sort clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Dotted field path.
    pub field: String,
    /// Direction.
    pub order: SortOrder,
}

impl Sort {
    /// Sort by global sequence.
    pub fn by_global_sequence(order: SortOrder) -> Self {
        Self {
            field: GLOBAL_SEQUENCE_FIELD.to_string(),
            order,
        }
    }
}

/// One sub-request of a multi-search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Shard to search.
    pub shard: String,
    /// Filter.
    pub query: Query,
    /// Optional sort.
    pub sort: Option<Sort>,
    /// Number of leading hits to skip.
    pub from: u64,
    /// Maximum hits to return.
    pub size: u64,
}

/// Hits (document sources) of one sub-request, or that sub-request's error.
pub type SubSearchResult = Result<Vec<Value>, String>;

/// One item of a multi-get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItem {
    /// Shard to read.
    pub shard: String,
    /// Document id.
    pub id: String,
}

/// Outcome of one multi-get item.
#[derive(Debug, Clone, PartialEq)]
pub enum GetOutcome {
    /// Document source.
    Found(Value),
    /// No document with this id in this shard.
    Missing,
    /// The item failed; other items are unaffected.
    Failed(String),
}

/// Result of one multi-get item, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct GetResult {
    /// Shard that was read.
    pub shard: String,
    /// Requested id.
    pub id: String,
    /// Outcome.
    pub outcome: GetOutcome,
}

/// Search backend - outbound port.
///
/// Partial failures are reported per sub-request / per item; an `Err` from
/// a method means the whole call failed.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Raw index listing, one index per line.
    async fn list_shards(&self) -> Result<String, BackendError>;

    /// Number of documents in `shard` matching `query`.
    async fn count(&self, shard: &str, query: &Query) -> Result<u64, BackendError>;

    /// Run every request; one result per request, in order.
    async fn multi_search(
        &self,
        requests: &[SearchRequest],
    ) -> Result<Vec<SubSearchResult>, BackendError>;

    /// Fetch documents by id; one result per item, in order.
    async fn multi_get(&self, items: &[GetItem]) -> Result<Vec<GetResult>, BackendError>;
}
