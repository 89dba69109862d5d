//! # Elasticsearch Search Backend
//!
//! [`SearchBackend`] over the Elasticsearch HTTP API:
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | `list_shards` | `GET /_cat/indices?v&s=index` |
//! | `count` | `POST /<shard>/_count` |
//! | `multi_search` | `POST /_msearch` (NDJSON) |
//! | `multi_get` | `POST /_mget` |
//!
//! Every call is counted and timed in `hq_backend_calls_total` and
//! `hq_backend_call_duration_seconds`.

pub mod dsl;
pub mod responses;

use async_trait::async_trait;
use bytes::Bytes;
use history_telemetry::{record_backend_call, HistogramTimer, BACKEND_CALL_DURATION};
use reqwest::{header, Client, StatusCode};
use serde_json::json;
use shared_types::{
    BackendError, GetItem, GetResult, Query, SearchBackend, SearchRequest, SubSearchResult,
};
use std::time::Duration;
use tracing::{debug, instrument};

use responses::{decode, CountResponse, MultiGetResponse, MultiSearchResponse};

/// Elasticsearch client.
#[derive(Clone)]
pub struct ElasticsearchBackend {
    client: Client,
    base_url: String,
}

impl ElasticsearchBackend {
    /// Client for the cluster at `base_url`, each call bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send `request`; status and body of whatever came back.
    async fn execute(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, Bytes), BackendError> {
        let _timer = HistogramTimer::labelled(&BACKEND_CALL_DURATION, &[operation]);
        let result = async {
            let response = request
                .send()
                .await
                .map_err(|e| BackendError::Unreachable(e.to_string()))?;
            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| BackendError::Unreachable(e.to_string()))?;
            Ok::<_, BackendError>((status, body))
        }
        .await;
        record_backend_call(
            operation,
            matches!(&result, Ok((status, _)) if status.is_success()),
        );
        result
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> BackendError {
    BackendError::Status {
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    #[instrument(skip(self))]
    async fn list_shards(&self) -> Result<String, BackendError> {
        let (status, body) = self
            .execute("list_shards", self.client.get(self.url("_cat/indices?v&s=index")))
            .await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        String::from_utf8(body.to_vec()).map_err(|e| BackendError::MalformedResponse(e.to_string()))
    }

    #[instrument(skip(self, query))]
    async fn count(&self, shard: &str, query: &Query) -> Result<u64, BackendError> {
        let request = self
            .client
            .post(self.url(&format!("{}/_count", shard)))
            .json(&json!({ "query": dsl::query_dsl(query) }));
        let (status, body) = self.execute("count", request).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::ShardNotFound(shard.to_string()));
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(decode::<CountResponse>(&body)?.count)
    }

    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    async fn multi_search(
        &self,
        requests: &[SearchRequest],
    ) -> Result<Vec<SubSearchResult>, BackendError> {
        let request = self
            .client
            .post(self.url("_msearch"))
            .header(header::CONTENT_TYPE, "application/x-ndjson")
            .body(dsl::msearch_body(requests));
        let (status, body) = self.execute("multi_search", request).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        let results = decode::<MultiSearchResponse>(&body)?.into_results(requests.len());
        debug!(
            failed = results.iter().filter(|r| r.is_err()).count(),
            "Multi-search complete"
        );
        Ok(results)
    }

    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn multi_get(&self, items: &[GetItem]) -> Result<Vec<GetResult>, BackendError> {
        let docs: Vec<_> = items
            .iter()
            .map(|item| json!({ "_index": item.shard, "_id": item.id }))
            .collect();
        let request = self
            .client
            .post(self.url("_mget"))
            .json(&json!({ "docs": docs }));
        let (status, body) = self.execute("multi_get", request).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(decode::<MultiGetResponse>(&body)?.into_results(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalised() {
        let backend =
            ElasticsearchBackend::new("http://es:9200/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url("_mget"), "http://es:9200/_mget");
    }

    #[tokio::test]
    async fn test_unreachable_cluster() {
        let backend =
            ElasticsearchBackend::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let err = backend.list_shards().await.unwrap_err();
        assert!(matches!(err, BackendError::Unreachable(_)));
    }
}
