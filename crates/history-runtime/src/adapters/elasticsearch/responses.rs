//! Elasticsearch response bodies.

use serde::Deserialize;
use serde_json::Value;
use shared_types::{BackendError, GetItem, GetOutcome, GetResult, SubSearchResult};

/// `_count` response.
#[derive(Debug, Deserialize)]
pub struct CountResponse {
    /// Matching documents.
    pub count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct Hit {
    #[serde(rename = "_source", default)]
    source: Value,
}

#[derive(Debug, Default, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Hits,
    #[serde(default)]
    error: Option<Value>,
}

/// `_msearch` response.
#[derive(Debug, Deserialize)]
pub struct MultiSearchResponse {
    #[serde(default)]
    responses: Vec<SearchResponse>,
}

impl MultiSearchResponse {
    /// One result per request, in order. A missing response entry counts as
    /// a failed sub-request.
    pub fn into_results(self, expected: usize) -> Vec<SubSearchResult> {
        let mut responses = self.responses.into_iter();
        (0..expected)
            .map(|_| match responses.next() {
                Some(SearchResponse {
                    error: Some(error), ..
                }) => Err(error_reason(&error)),
                Some(response) => Ok(response.hits.hits.into_iter().map(|h| h.source).collect()),
                None => Err("missing response".to_string()),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct GetDoc {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source", default)]
    source: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// `_mget` response.
#[derive(Debug, Deserialize)]
pub struct MultiGetResponse {
    #[serde(default)]
    docs: Vec<GetDoc>,
}

impl MultiGetResponse {
    /// One result per item, in order.
    pub fn into_results(self, items: &[GetItem]) -> Vec<GetResult> {
        let mut docs = self.docs.into_iter();
        items
            .iter()
            .map(|item| {
                let outcome = match docs.next() {
                    Some(GetDoc {
                        error: Some(error), ..
                    }) => GetOutcome::Failed(error_reason(&error)),
                    Some(GetDoc {
                        found: true,
                        source: Some(source),
                        ..
                    }) => GetOutcome::Found(source),
                    Some(_) => GetOutcome::Missing,
                    None => GetOutcome::Failed("missing response".to_string()),
                };
                GetResult {
                    shard: item.shard.clone(),
                    id: item.id.clone(),
                    outcome,
                }
            })
            .collect()
    }
}

/// Short description of an Elasticsearch error object.
pub fn error_reason(error: &Value) -> String {
    match error {
        Value::String(reason) => reason.clone(),
        Value::Object(map) => {
            let kind = map.get("type").and_then(Value::as_str).unwrap_or("error");
            match map.get("reason").and_then(Value::as_str) {
                Some(reason) => format!("{}: {}", kind, reason),
                None => kind.to_string(),
            }
        }
        other => other.to_string(),
    }
}

/// Decode a body, mapping failures to [`BackendError::MalformedResponse`].
pub fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|e| BackendError::MalformedResponse(e.to_string()))
}
