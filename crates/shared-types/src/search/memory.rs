//! In-memory search backend.
//!
//! Holds JSON documents per shard and evaluates the [`Query`] model against
//! them with the same field semantics as the production backend (dotted
//! paths, arrays flattened along the path). Every call is recorded so tests
//! can assert which shards were touched, and the backend can be switched
//! into a failing mode to exercise error paths.

use super::{
    Filter, GetItem, GetOutcome, GetResult, Query, SearchBackend, SearchRequest, Sort,
    SortOrder, SubSearchResult,
};
use crate::entities::GlobalSequence;
use crate::errors::BackendError;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

/// A call observed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    /// `list_shards()`.
    ListShards,
    /// `count(shard, ..)`.
    Count {
        /// Shard counted.
        shard: String,
    },
    /// `multi_search(..)`, one `(shard, from, size)` per sub-request.
    MultiSearch {
        /// Sub-requests.
        requests: Vec<(String, u64, u64)>,
    },
    /// `multi_get(..)`.
    MultiGet {
        /// Number of items requested.
        items: usize,
    },
}

#[derive(Debug, Clone)]
struct StoredDoc {
    id: String,
    source: Value,
}

/// Search backend over in-memory shards.
#[derive(Debug, Default)]
pub struct InMemorySearchBackend {
    shards: RwLock<BTreeMap<String, Vec<StoredDoc>>>,
    calls: Mutex<Vec<BackendCall>>,
    failing: AtomicBool,
}

impl InMemorySearchBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty shard (no-op if it exists).
    pub fn create_shard(&self, shard: &str) {
        self.shards.write().entry(shard.to_string()).or_default();
    }

    /// Drop a shard and its documents.
    pub fn delete_shard(&self, shard: &str) {
        self.shards.write().remove(shard);
    }

    /// Insert or replace a document, creating the shard if needed.
    pub fn insert(&self, shard: &str, id: &str, source: Value) {
        let mut shards = self.shards.write();
        let docs = shards.entry(shard.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(existing) => existing.source = source,
            None => docs.push(StoredDoc {
                id: id.to_string(),
                source,
            }),
        }
    }

    /// Make every subsequent call fail with [`BackendError::Unreachable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, AtomicOrdering::SeqCst);
    }

    /// Calls observed so far.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Forget observed calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: BackendCall) -> Result<(), BackendError> {
        self.calls.lock().push(call);
        if self.failing.load(AtomicOrdering::SeqCst) {
            return Err(BackendError::Unreachable("connection refused".into()));
        }
        Ok(())
    }

    fn search_one(&self, request: &SearchRequest) -> SubSearchResult {
        let shards = self.shards.read();
        let docs = shards
            .get(&request.shard)
            .ok_or_else(|| format!("index_not_found_exception: {}", request.shard))?;

        let mut hits: Vec<&Value> = docs
            .iter()
            .map(|d| &d.source)
            .filter(|source| matches_query(&request.query, source))
            .collect();

        if let Some(sort) = &request.sort {
            hits.sort_by(|a, b| compare_by(sort, a, b));
        }

        Ok(hits
            .into_iter()
            .skip(request.from as usize)
            .take(request.size as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SearchBackend for InMemorySearchBackend {
    async fn list_shards(&self) -> Result<String, BackendError> {
        self.record(BackendCall::ListShards)?;
        let shards = self.shards.read();
        let mut listing = String::from(
            "health status index uuid pri rep docs.count docs.deleted store.size pri.store.size\n",
        );
        for (name, docs) in shards.iter() {
            listing.push_str(&format!(
                "green  open   {} mem{} 1 0 {} 0 1kb 1kb\n",
                name,
                name.len(),
                docs.len()
            ));
        }
        Ok(listing)
    }

    async fn count(&self, shard: &str, query: &Query) -> Result<u64, BackendError> {
        self.record(BackendCall::Count {
            shard: shard.to_string(),
        })?;
        let shards = self.shards.read();
        let docs = shards
            .get(shard)
            .ok_or_else(|| BackendError::ShardNotFound(shard.to_string()))?;
        Ok(docs
            .iter()
            .filter(|d| matches_query(query, &d.source))
            .count() as u64)
    }

    async fn multi_search(
        &self,
        requests: &[SearchRequest],
    ) -> Result<Vec<SubSearchResult>, BackendError> {
        self.record(BackendCall::MultiSearch {
            requests: requests
                .iter()
                .map(|r| (r.shard.clone(), r.from, r.size))
                .collect(),
        })?;
        Ok(requests.iter().map(|r| self.search_one(r)).collect())
    }

    async fn multi_get(&self, items: &[GetItem]) -> Result<Vec<GetResult>, BackendError> {
        self.record(BackendCall::MultiGet { items: items.len() })?;
        let shards = self.shards.read();
        Ok(items
            .iter()
            .map(|item| {
                let outcome = match shards.get(&item.shard) {
                    None => GetOutcome::Failed(format!("index_not_found_exception: {}", item.shard)),
                    Some(docs) => docs
                        .iter()
                        .find(|d| d.id == item.id)
                        .map(|d| GetOutcome::Found(d.source.clone()))
                        .unwrap_or(GetOutcome::Missing),
                };
                GetResult {
                    shard: item.shard.clone(),
                    id: item.id.clone(),
                    outcome,
                }
            })
            .collect())
    }
}

// =============================================================================
// QUERY EVALUATION
// =============================================================================

/// Values reachable through a dotted path, flattening arrays on the way.
fn field_values<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![doc];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => {
                    if let Some(child) = map.get(segment) {
                        push_flattened(child, &mut next);
                    }
                }
                Value::Array(items) => {
                    for item in items {
                        if let Some(child) = item.get(segment) {
                            push_flattened(child, &mut next);
                        }
                    }
                }
                _ => {}
            }
        }
        current = next;
    }
    current
}

fn push_flattened<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => out.extend(items.iter()),
        other => out.push(other),
    }
}

fn any_equals(doc: &Value, path: &str, expected: &str) -> bool {
    field_values(doc, path)
        .into_iter()
        .any(|v| v.as_str() == Some(expected))
}

fn block_time(doc: &Value) -> Option<&str> {
    doc.get("block_time").and_then(Value::as_str)
}

fn matches_filter(filter: &Filter, doc: &Value) -> bool {
    match filter {
        Filter::AccountActivity(account) => {
            any_equals(doc, "receipt.receiver", account)
                || any_equals(doc, "act.authorization.actor", account)
        }
        Filter::NotExceptional => field_values(doc, "except")
            .into_iter()
            .all(Value::is_null),
        Filter::PublicKey(key) => any_equals(doc, "pub_keys.key", key),
        Filter::ControllingAccount(name) => any_equals(doc, "account_controls.name", name),
        Filter::ActionData(text) => field_values(doc, "act.data")
            .into_iter()
            .any(|v| match v {
                Value::String(s) => s.contains(text.as_str()),
                other => other.to_string().contains(text.as_str()),
            }),
        Filter::BlockTimeRange { from, to } => match block_time(doc) {
            Some(time) => {
                from.as_deref().map_or(true, |f| time >= f)
                    && to.as_deref().map_or(true, |t| time <= t)
            }
            None => false,
        },
        Filter::RecentDays(days) => {
            let start = (Utc::now() - Duration::days(i64::from(*days)))
                .format("%Y-%m-%dT00:00:00")
                .to_string();
            block_time(doc).map_or(false, |time| time >= start.as_str())
        }
    }
}

fn matches_query(query: &Query, doc: &Value) -> bool {
    query.filters.iter().all(|f| matches_filter(f, doc))
}

fn sort_key(doc: &Value, field: &str) -> Option<GlobalSequence> {
    field_values(doc, field)
        .first()
        .and_then(|v| GlobalSequence::from_json(v))
}

fn compare_by(sort: &Sort, a: &Value, b: &Value) -> Ordering {
    let ordering = sort_key(a, &sort.field).cmp(&sort_key(b, &sort.field));
    match sort.order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}
