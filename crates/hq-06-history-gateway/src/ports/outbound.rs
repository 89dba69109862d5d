//! Outbound ports for the history gateway.

use crate::domain::{ChainBlock, ChainInfo, ChainNodeError};
use async_trait::async_trait;
use serde_json::Value;

/// Chain node consulted for best-effort enrichment.
#[async_trait]
pub trait ChainNode: Send + Sync {
    /// Current chain state.
    async fn get_info(&self) -> Result<ChainInfo, ChainNodeError>;

    /// Block by number (or id), as the trace recorded it.
    async fn get_block(&self, block_num_or_id: &Value) -> Result<ChainBlock, ChainNodeError>;
}
