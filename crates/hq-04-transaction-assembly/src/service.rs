//! Transaction assembly service.

use crate::algorithms::assemble;
use crate::domain::{AssemblyError, GetTransactionRequest, TransactionView};
use crate::ports::TransactionHistoryApi;
use async_trait::async_trait;
use hq_01_shard_catalog::CatalogReader;
use serde_json::Value;
use shared_types::{
    GetItem, GetOutcome, SearchBackend, StreamKind, TransactionDoc, TransactionTraceDoc,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Looks a transaction up in every trace and transaction shard.
pub struct TransactionAssemblyService {
    backend: Arc<dyn SearchBackend>,
    catalog: Arc<dyn CatalogReader>,
}

/// Latest document per stream. A newer trace that fails to decode
/// replaces an older decoded one.
#[derive(Default)]
struct Lookup {
    trace: Option<Result<TransactionTraceDoc, String>>,
    transaction: Option<TransactionDoc>,
}

impl Lookup {
    fn record(&mut self, stream: StreamKind, source: Value) -> Result<(), serde_json::Error> {
        match stream {
            StreamKind::TransactionTraces => match serde_json::from_value(source) {
                Ok(trace) => self.trace = Some(Ok(trace)),
                Err(e) => {
                    self.trace = Some(Err(e.to_string()));
                    return Err(e);
                }
            },
            StreamKind::Transactions => self.transaction = Some(serde_json::from_value(source)?),
            _ => {}
        }
        Ok(())
    }
}

impl TransactionAssemblyService {
    /// Create the service.
    pub fn new(backend: Arc<dyn SearchBackend>, catalog: Arc<dyn CatalogReader>) -> Self {
        Self { backend, catalog }
    }

    /// One multi-get of `id` across both streams. Shards are visited oldest
    /// first, so the newest shard holding the id wins.
    async fn lookup(&self, id: &str) -> Result<Lookup, AssemblyError> {
        let catalog = self.catalog.snapshot();
        let mut streams = Vec::new();
        let mut items = Vec::new();
        for stream in [StreamKind::TransactionTraces, StreamKind::Transactions] {
            for shard in catalog.shards(stream) {
                streams.push(stream);
                items.push(GetItem {
                    shard: shard.name.clone(),
                    id: id.to_string(),
                });
            }
        }
        if items.is_empty() {
            return Ok(Lookup::default());
        }

        let mut lookup = Lookup::default();
        let results = self.backend.multi_get(&items).await?;
        for (stream, result) in streams.into_iter().zip(results) {
            match result.outcome {
                GetOutcome::Found(source) => {
                    if let Err(e) = lookup.record(stream, source) {
                        warn!(shard = %result.shard, error = %e, "Undecodable document");
                    }
                }
                GetOutcome::Missing => {}
                GetOutcome::Failed(reason) => {
                    warn!(shard = %result.shard, %reason, "Transaction lookup failed")
                }
            }
        }
        Ok(lookup)
    }
}

#[async_trait]
impl TransactionHistoryApi for TransactionAssemblyService {
    #[instrument(skip(self, request), fields(id = %request.id))]
    async fn get_transaction(
        &self,
        request: GetTransactionRequest,
    ) -> Result<TransactionView, AssemblyError> {
        let lookup = self.lookup(&request.id).await?;
        let trace = match lookup.trace {
            Some(Ok(trace)) => trace,
            Some(Err(reason)) => return Err(AssemblyError::MalformedTrace(reason)),
            None => return Err(AssemblyError::NotFound { id: request.id }),
        };
        debug!(envelope = lookup.transaction.is_some(), "Trace found");
        assemble(&request.id, trace, lookup.transaction)
    }
}
