//! In-memory chain node.
//!
//! Serves a fixed `get_info` and a set of blocks; anything it does not hold
//! fails the way an unreachable node would. Used by the test suites and by
//! deployments without a node.

use crate::domain::{ChainBlock, ChainInfo, ChainNodeError};
use crate::ports::ChainNode;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Chain node backed by memory.
#[derive(Debug, Default)]
pub struct StaticChainNode {
    info: RwLock<Option<ChainInfo>>,
    blocks: RwLock<HashMap<String, ChainBlock>>,
}

impl StaticChainNode {
    /// Node that knows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `get_info` with `info`.
    pub fn set_info(&self, info: ChainInfo) {
        *self.info.write() = Some(info);
    }

    /// Serve `block` for `block_num`.
    pub fn insert_block(&self, block_num: u64, block: ChainBlock) {
        self.blocks.write().insert(block_num.to_string(), block);
    }

    fn key(block_num_or_id: &Value) -> String {
        match block_num_or_id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl ChainNode for StaticChainNode {
    async fn get_info(&self) -> Result<ChainInfo, ChainNodeError> {
        self.info
            .read()
            .clone()
            .ok_or_else(|| ChainNodeError::Unreachable("no chain info".into()))
    }

    async fn get_block(&self, block_num_or_id: &Value) -> Result<ChainBlock, ChainNodeError> {
        self.blocks
            .read()
            .get(&Self::key(block_num_or_id))
            .cloned()
            .ok_or(ChainNodeError::Status(400))
    }
}
