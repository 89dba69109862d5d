//! # History Node Runtime
//!
//! Wires the history subsystems into one process:
//!
//! ```text
//! Elasticsearch ──→ ShardCatalogService (refreshed every interval)
//!       │                    │
//!       ├──→ ActionPagingService ──────┐
//!       ├──→ TransactionAssemblyService ├──→ HistoryGatewayService (HTTP)
//!       └──→ AccountLookupService ─────┘            │
//!                                                  ↓
//!                                             Chain node
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file, then environment)
//! 2. Install telemetry
//! 3. Connect the Elasticsearch and chain-node adapters
//! 4. Start the catalog refresh task (first refresh runs immediately)
//! 5. Bind and serve until the shutdown signal, then drain
//!
//! ## Module Structure
//!
//! ```text
//! history-runtime/
//! ├── config.rs          # RuntimeConfig: file + env
//! └── adapters/
//!     ├── elasticsearch/ # SearchBackend over HTTP
//!     └── chain_node.rs  # ChainNode over HTTP
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;

use hq_01_shard_catalog::{CatalogReader, ShardCatalogService};
use hq_03_action_paging::ActionPagingService;
use hq_04_transaction_assembly::TransactionAssemblyService;
use hq_05_account_lookup::AccountLookupService;
use hq_06_history_gateway::{AppState, ChainNode, ChainNodeError, GatewayError, HistoryGatewayService};
use shared_types::{BackendError, SearchBackend};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

// Re-exports
pub use adapters::{ElasticsearchBackend, HttpChainNode};
pub use config::{ConfigError, RuntimeConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Startup and serving failures.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Elasticsearch client could not be built
    #[error("search backend: {0}")]
    Backend(#[from] BackendError),

    /// Chain node client could not be built
    #[error("chain node: {0}")]
    ChainNode(#[from] ChainNodeError),

    /// Gateway failed to bind or serve
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The assembled history node.
pub struct HistoryNode {
    config: RuntimeConfig,
    catalog: Arc<ShardCatalogService>,
    gateway: HistoryGatewayService,
    shutdown_tx: watch::Sender<bool>,
}

impl HistoryNode {
    /// Node talking to the Elasticsearch cluster and chain node named in
    /// `config`.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        let backend = ElasticsearchBackend::new(&config.elastic_url, config.backend_timeout)?;
        let chain = HttpChainNode::new(&config.chain_node_url, config.backend_timeout)?;
        Self::with_adapters(config, Arc::new(backend), Arc::new(chain))
    }

    /// Node over the given adapters.
    pub fn with_adapters(
        config: RuntimeConfig,
        backend: Arc<dyn SearchBackend>,
        chain: Arc<dyn ChainNode>,
    ) -> Result<Self, RuntimeError> {
        let catalog = Arc::new(ShardCatalogService::new(Arc::clone(&backend)));
        let reader: Arc<dyn CatalogReader> = catalog.clone();

        let state = AppState {
            actions: Arc::new(ActionPagingService::new(backend.clone(), reader.clone())),
            transactions: Arc::new(TransactionAssemblyService::new(
                backend.clone(),
                reader.clone(),
            )),
            accounts: Arc::new(AccountLookupService::new(backend, reader.clone())),
            catalog: reader,
            chain,
        };
        let gateway = HistoryGatewayService::new(config.gateway_config(), state)?;
        let (shutdown_tx, _) = watch::channel(false);

        info!(
            elastic_url = %config.elastic_url,
            chain_node_url = %config.chain_node_url,
            "History node assembled"
        );
        Ok(Self {
            config,
            catalog,
            gateway,
            shutdown_tx,
        })
    }

    /// The shard catalog.
    pub fn catalog(&self) -> Arc<ShardCatalogService> {
        Arc::clone(&self.catalog)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, RuntimeError> {
        Ok(self.gateway.bind().await?)
    }

    /// Bind, then [`serve`](Self::serve).
    pub async fn run<F>(self, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Keep the catalog fresh and serve on `listener` until `shutdown`
    /// resolves. In-flight requests drain before the refresh task stops.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let HistoryNode {
            config,
            catalog,
            gateway,
            shutdown_tx,
        } = self;

        let refresh =
            catalog.spawn_refresh_task(config.catalog_refresh_interval, shutdown_tx.subscribe());

        let served = gateway.serve(listener, shutdown).await;

        info!("Initiating graceful shutdown...");
        let _ = shutdown_tx.send(true);
        if let Err(e) = refresh.await {
            error!(error = %e, "Catalog refresh task panicked");
        }
        info!("Shutdown complete");

        Ok(served?)
    }
}
