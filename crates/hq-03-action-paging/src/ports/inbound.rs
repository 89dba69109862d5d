//! Inbound port: action history API.

use crate::domain::{
    FindActionsRequest, FindActionsResponse, GetActionsRequest, GetActionsResponse, PagingError,
};
use async_trait::async_trait;

/// Action history queries.
#[async_trait]
pub trait ActionHistoryApi: Send + Sync {
    /// A window of one account's actions.
    async fn get_actions(&self, request: GetActionsRequest)
        -> Result<GetActionsResponse, PagingError>;

    /// Actions whose data matches a text, optionally narrowed.
    async fn find_actions(
        &self,
        request: FindActionsRequest,
    ) -> Result<FindActionsResponse, PagingError>;
}
