//! Outbound adapters: the Elasticsearch cluster and the chain node.

pub mod chain_node;
pub mod elasticsearch;

pub use chain_node::HttpChainNode;
pub use elasticsearch::ElasticsearchBackend;
