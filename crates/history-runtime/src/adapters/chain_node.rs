//! Chain node over its HTTP API.
//!
//! - `get_info`: `GET /v1/chain/get_info`
//! - `get_block`: `POST /v1/chain/get_block` with `{"block_num_or_id": ...}`

use async_trait::async_trait;
use hq_06_history_gateway::{ChainBlock, ChainInfo, ChainNode, ChainNodeError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::instrument;

/// Chain node client.
#[derive(Clone)]
pub struct HttpChainNode {
    client: Client,
    base_url: String,
}

impl HttpChainNode {
    /// Client for the node at `base_url`, each call bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ChainNodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainNodeError::Unreachable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/v1/chain/{}", self.base_url, endpoint)
    }

    async fn read<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, ChainNodeError> {
        let response = request
            .send()
            .await
            .map_err(|e| ChainNodeError::Unreachable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainNodeError::Status(status.as_u16()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| ChainNodeError::Unreachable(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ChainNodeError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ChainNode for HttpChainNode {
    #[instrument(skip(self))]
    async fn get_info(&self) -> Result<ChainInfo, ChainNodeError> {
        Self::read(self.client.get(self.url("get_info"))).await
    }

    #[instrument(skip(self))]
    async fn get_block(&self, block_num_or_id: &Value) -> Result<ChainBlock, ChainNodeError> {
        let request = self
            .client
            .post(self.url("get_block"))
            .json(&json!({ "block_num_or_id": block_num_or_id }));
        Self::read(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let node = HttpChainNode::new("http://node:8888/", Duration::from_secs(1)).unwrap();
        assert_eq!(node.url("get_info"), "http://node:8888/v1/chain/get_info");
        assert_eq!(node.url("get_block"), "http://node:8888/v1/chain/get_block");
    }

    #[tokio::test]
    async fn test_unreachable_node() {
        let node = HttpChainNode::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        assert!(matches!(
            node.get_info().await,
            Err(ChainNodeError::Unreachable(_))
        ));
        assert!(matches!(
            node.get_block(&serde_json::json!(7)).await,
            Err(ChainNodeError::Unreachable(_))
        ));
    }
}
