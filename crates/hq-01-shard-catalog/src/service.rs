//! Shard catalog service: refresh, publish, snapshot.

use crate::algorithms::parse_index_listing;
use crate::domain::{CatalogError, CatalogStatus, ShardCatalog};
use crate::ports::CatalogReader;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use history_telemetry::{CATALOG_REFRESHES, CATALOG_SHARDS};
use parking_lot::Mutex;
use shared_types::SearchBackend;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Refresh period used when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct RefreshLog {
    last_refreshed: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// Owns the published catalog.
///
/// Starts empty; handlers started before the first refresh see no shards.
pub struct ShardCatalogService {
    backend: Arc<dyn SearchBackend>,
    current: ArcSwap<ShardCatalog>,
    refreshes: AtomicU64,
    failures: AtomicU64,
    log: Mutex<RefreshLog>,
}

impl ShardCatalogService {
    /// Create a service with an empty catalog.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            current: ArcSwap::from_pointee(ShardCatalog::empty()),
            refreshes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            log: Mutex::new(RefreshLog::default()),
        }
    }

    /// List indices and publish the resulting catalog.
    ///
    /// On failure the previous snapshot stays published and the error is
    /// returned. An empty listing is published as an empty catalog.
    pub async fn refresh(&self) -> Result<Arc<ShardCatalog>, CatalogError> {
        let listing = match self.backend.list_shards().await {
            Ok(listing) => listing,
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                self.log.lock().last_error = Some(e.to_string());
                CATALOG_REFRESHES.with_label_values(&["failure"]).inc();
                warn!(error = %e, "Shard catalog refresh failed; keeping previous snapshot");
                return Err(CatalogError::ListingFailed(e));
            }
        };

        let generation = self.current.load().generation() + 1;
        let catalog = Arc::new(parse_index_listing(&listing).with_generation(generation));
        self.current.store(Arc::clone(&catalog));

        self.refreshes.fetch_add(1, Ordering::Relaxed);
        {
            let mut log = self.log.lock();
            log.last_refreshed = Some(Utc::now());
            log.last_error = None;
        }
        CATALOG_REFRESHES.with_label_values(&["success"]).inc();
        for (stream, count) in catalog.shard_counts() {
            CATALOG_SHARDS
                .with_label_values(&[stream.as_str()])
                .set(count as f64);
        }

        debug!(generation, shards = ?catalog.shard_counts(), "Shard catalog published");
        Ok(catalog)
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<ShardCatalog> {
        self.current.load_full()
    }

    /// Health view.
    pub fn status(&self) -> CatalogStatus {
        let catalog = self.current.load();
        let log = self.log.lock();
        CatalogStatus {
            generation: catalog.generation(),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            last_refreshed: log.last_refreshed,
            last_error: log.last_error.clone(),
            shards: catalog.shard_counts(),
        }
    }

    /// Refresh immediately, then every `interval` until `shutdown` flips to
    /// `true` or its sender is dropped.
    pub fn spawn_refresh_task(
        self: &Arc<Self>,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_secs = interval.as_secs(), "Shard catalog refresh task started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Errors are logged inside refresh; retry on the next tick.
                        let _ = service.refresh().await;
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Shard catalog refresh task stopped");
        })
    }
}

impl CatalogReader for ShardCatalogService {
    fn snapshot(&self) -> Arc<ShardCatalog> {
        ShardCatalogService::snapshot(self)
    }

    fn status(&self) -> CatalogStatus {
        ShardCatalogService::status(self)
    }
}
