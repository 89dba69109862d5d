//! Action paging service.
//!
//! Each request takes one catalog snapshot and runs four sequential phases:
//! count, search, trace fetch, stitch.

use crate::algorithms::{
    account_action_seq, distinct_trx_ids, plan_fetches, render_action_trace, ActionHit,
    FetchPlan,
};
use crate::domain::{
    FindActionsRequest, FindActionsResponse, GetActionsRequest, GetActionsResponse, PageWindow,
    PagingError, MAX_FIND_ACTIONS_RESULTS,
};
use crate::ports::ActionHistoryApi;
use async_trait::async_trait;
use hq_01_shard_catalog::{CatalogReader, ShardCatalog};
use shared_types::{
    Filter, GetItem, GetOutcome, Query, SearchBackend, SearchRequest, Sort, SortOrder,
    StreamKind, TransactionTraceDoc,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Paging engine over the `action_traces` stream.
pub struct ActionPagingService {
    backend: Arc<dyn SearchBackend>,
    catalog: Arc<dyn CatalogReader>,
}

impl ActionPagingService {
    /// Create the service.
    pub fn new(backend: Arc<dyn SearchBackend>, catalog: Arc<dyn CatalogReader>) -> Self {
        Self { backend, catalog }
    }

    /// Per-shard counts of the account's actions, in traversal order.
    async fn count_shards(
        &self,
        catalog: &ShardCatalog,
        account: &str,
        order: SortOrder,
    ) -> Result<Vec<(String, u64)>, PagingError> {
        let query = Query::new().filter(Filter::AccountActivity(account.to_string()));
        let mut counts = Vec::new();
        for shard in catalog.ordered(StreamKind::ActionTraces, order) {
            let count = self
                .backend
                .count(&shard.name, &query)
                .await
                .map_err(|source| PagingError::Count {
                    shard: shard.name.clone(),
                    source,
                })?;
            counts.push((shard.name.clone(), count));
        }
        Ok(counts)
    }

    /// Run a multi-search and decode hits. Each hit is paired with its
    /// window position when `positions` is given.
    async fn search(
        &self,
        requests: Vec<SearchRequest>,
        positions: Option<&[u64]>,
    ) -> Result<Vec<(Option<u64>, ActionHit)>, PagingError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let results = self.backend.multi_search(&requests).await?;

        let mut hits = Vec::new();
        for (i, (request, result)) in requests.iter().zip(results).enumerate() {
            let sources = match result {
                Ok(sources) => sources,
                Err(reason) => {
                    warn!(
                        shard = %request.shard,
                        %reason,
                        "Search sub-request failed; skipping shard"
                    );
                    continue;
                }
            };
            let base = positions.and_then(|p| p.get(i).copied());
            for (j, source) in sources.into_iter().enumerate() {
                match ActionHit::from_source(source) {
                    Some(hit) => hits.push((base.map(|b| b + j as u64), hit)),
                    None => debug!(shard = %request.shard, "Skipping undecodable hit"),
                }
            }
        }
        Ok(hits)
    }

    /// One batched lookup of every needed trace across all trace shards.
    /// When several shards hold the same id the newest shard wins.
    async fn fetch_traces(
        &self,
        catalog: &ShardCatalog,
        trx_ids: &[String],
    ) -> Result<HashMap<String, TransactionTraceDoc>, PagingError> {
        let shards = catalog.shards(StreamKind::TransactionTraces);
        if trx_ids.is_empty() || shards.is_empty() {
            return Ok(HashMap::new());
        }

        let items: Vec<GetItem> = shards
            .iter()
            .flat_map(|shard| {
                trx_ids.iter().map(move |id| GetItem {
                    shard: shard.name.clone(),
                    id: id.clone(),
                })
            })
            .collect();

        let mut traces = HashMap::new();
        for result in self.backend.multi_get(&items).await? {
            match result.outcome {
                GetOutcome::Found(source) => {
                    match serde_json::from_value::<TransactionTraceDoc>(source) {
                        Ok(trace) => {
                            traces.insert(result.id, trace);
                        }
                        Err(e) => debug!(
                            shard = %result.shard,
                            id = %result.id,
                            error = %e,
                            "Undecodable transaction trace"
                        ),
                    }
                }
                GetOutcome::Missing => {}
                GetOutcome::Failed(reason) => {
                    warn!(shard = %result.shard, id = %result.id, %reason, "Trace lookup failed")
                }
            }
        }
        Ok(traces)
    }

    fn build_requests(window: &PageWindow, plan: &FetchPlan, account: &str) -> Vec<SearchRequest> {
        let query = Query::account_actions(account);
        plan.fetches
            .iter()
            .map(|fetch| SearchRequest {
                shard: fetch.shard.clone(),
                query: query.clone(),
                sort: Some(Sort::by_global_sequence(window.order)),
                from: fetch.from,
                size: fetch.size,
            })
            .collect()
    }
}

#[async_trait]
impl ActionHistoryApi for ActionPagingService {
    #[instrument(skip(self, request), fields(account = %request.account_name))]
    async fn get_actions(
        &self,
        request: GetActionsRequest,
    ) -> Result<GetActionsResponse, PagingError> {
        let Some(window) = request.page().normalize() else {
            debug!("Window selects nothing");
            return Ok(GetActionsResponse::default());
        };

        let catalog = self.catalog.snapshot();
        let counts = self
            .count_shards(&catalog, &request.account_name, window.order)
            .await?;
        let plan = plan_fetches(&window, &counts);
        debug!(
            order = ?window.order,
            start = window.start,
            count = window.count,
            total = plan.total,
            shards = plan.fetches.len(),
            "Fetch plan ready"
        );
        if plan.fetches.is_empty() {
            return Ok(GetActionsResponse::default());
        }

        let positions: Vec<u64> = plan.fetches.iter().map(|f| f.window_offset).collect();
        let requests = Self::build_requests(&window, &plan, &request.account_name);
        let hits = self.search(requests, Some(&positions)).await?;

        let trx_ids = distinct_trx_ids(hits.iter().map(|(_, hit)| hit));
        let traces = self.fetch_traces(&catalog, &trx_ids).await?;

        let mut actions = Vec::with_capacity(hits.len());
        for (position, hit) in hits {
            let seq = position.and_then(|p| account_action_seq(&window, plan.total, p));
            let action_trace = render_action_trace(&traces, &hit)?;
            actions.push(hit.into_entry(seq, action_trace));
        }

        Ok(GetActionsResponse {
            actions,
            last_irreversible_block: None,
        })
    }

    #[instrument(skip(self, request), fields(account = %request.account_name))]
    async fn find_actions(
        &self,
        request: FindActionsRequest,
    ) -> Result<FindActionsResponse, PagingError> {
        let mut query = Query::new().filter(Filter::ActionData(request.data.clone()));
        if !request.account_name.is_empty() {
            query = query.filter(Filter::AccountActivity(request.account_name.clone()));
        }
        if !request.from_date.is_empty() || !request.to_date.is_empty() {
            query = query.filter(Filter::BlockTimeRange {
                from: (!request.from_date.is_empty()).then(|| request.from_date.clone()),
                to: (!request.to_date.is_empty()).then(|| request.to_date.clone()),
            });
        }
        if let Some(days) = request.last_days {
            query = query.filter(Filter::RecentDays(days));
        }
        query = query.filter(Filter::NotExceptional);

        let catalog = self.catalog.snapshot();
        let requests: Vec<SearchRequest> = catalog
            .shards(StreamKind::ActionTraces)
            .iter()
            .map(|shard| SearchRequest {
                shard: shard.name.clone(),
                query: query.clone(),
                sort: Some(Sort::by_global_sequence(SortOrder::Ascending)),
                from: 0,
                size: MAX_FIND_ACTIONS_RESULTS,
            })
            .collect();

        let mut hits: Vec<ActionHit> = self
            .search(requests, None)
            .await?
            .into_iter()
            .map(|(_, hit)| hit)
            .collect();
        hits.sort_by_key(|hit| hit.global_sequence);
        hits.truncate(MAX_FIND_ACTIONS_RESULTS as usize);

        let traces = self
            .fetch_traces(&catalog, &distinct_trx_ids(&hits))
            .await?;

        let mut actions = Vec::with_capacity(hits.len());
        for hit in hits {
            let action_trace = render_action_trace(&traces, &hit)?;
            actions.push(hit.into_entry(None, action_trace));
        }

        Ok(FindActionsResponse { actions })
    }
}
