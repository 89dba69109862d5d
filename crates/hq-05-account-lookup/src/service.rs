//! Account lookup service.

use crate::domain::{
    GetControlledAccountsRequest, GetControlledAccountsResponse, GetKeyAccountsRequest,
    GetKeyAccountsResponse, LookupError, MAX_QUERY_SIZE,
};
use crate::ports::AccountLookupApi;
use async_trait::async_trait;
use hq_01_shard_catalog::CatalogReader;
use shared_types::{AccountDoc, Filter, Query, SearchBackend, SearchRequest, StreamKind};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Fans filtered searches out over the accounts stream.
pub struct AccountLookupService {
    backend: Arc<dyn SearchBackend>,
    catalog: Arc<dyn CatalogReader>,
}

impl AccountLookupService {
    /// Create the service.
    pub fn new(backend: Arc<dyn SearchBackend>, catalog: Arc<dyn CatalogReader>) -> Self {
        Self { backend, catalog }
    }

    /// Sorted names of every account matching `filter` in any shard.
    async fn matching_names(&self, filter: Filter) -> Result<Vec<String>, LookupError> {
        let catalog = self.catalog.snapshot();
        let query = Query::new().filter(filter);
        let requests: Vec<SearchRequest> = catalog
            .shards(StreamKind::Accounts)
            .iter()
            .map(|shard| SearchRequest {
                shard: shard.name.clone(),
                query: query.clone(),
                sort: None,
                from: 0,
                size: MAX_QUERY_SIZE,
            })
            .collect();
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let results = self.backend.multi_search(&requests).await?;
        let mut failed = 0;
        let mut names = Vec::new();
        for (request, result) in requests.iter().zip(results) {
            match result {
                Ok(sources) => {
                    for source in sources.into_iter().filter(|source| !source.is_null()) {
                        let account: AccountDoc =
                            serde_json::from_value(source).map_err(|e| {
                                warn!(shard = %request.shard, error = %e, "Undecodable account");
                                LookupError::UndecodableAccount {
                                    shard: request.shard.clone(),
                                    reason: e.to_string(),
                                }
                            })?;
                        names.push(account.name);
                    }
                }
                Err(reason) => {
                    warn!(shard = %request.shard, %reason, "Account search failed; skipping shard");
                    failed += 1;
                }
            }
        }
        if failed == requests.len() {
            return Err(LookupError::AllShardsFailed);
        }

        names.sort();
        debug!(matches = names.len(), "Account lookup complete");
        Ok(names)
    }
}

#[async_trait]
impl AccountLookupApi for AccountLookupService {
    #[instrument(skip(self, request), fields(public_key = %request.public_key))]
    async fn get_key_accounts(
        &self,
        request: GetKeyAccountsRequest,
    ) -> Result<GetKeyAccountsResponse, LookupError> {
        let account_names = self
            .matching_names(Filter::PublicKey(request.public_key))
            .await?;
        Ok(GetKeyAccountsResponse { account_names })
    }

    #[instrument(skip(self, request), fields(controlling_account = %request.controlling_account))]
    async fn get_controlled_accounts(
        &self,
        request: GetControlledAccountsRequest,
    ) -> Result<GetControlledAccountsResponse, LookupError> {
        let controlled_accounts = self
            .matching_names(Filter::ControllingAccount(request.controlling_account))
            .await?;
        Ok(GetControlledAccountsResponse {
            controlled_accounts,
        })
    }
}
