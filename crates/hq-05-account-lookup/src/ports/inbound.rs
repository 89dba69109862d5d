//! Inbound port: account lookup API.

use crate::domain::{
    GetControlledAccountsRequest, GetControlledAccountsResponse, GetKeyAccountsRequest,
    GetKeyAccountsResponse, LookupError,
};
use async_trait::async_trait;

/// Account lookups over the accounts stream.
#[async_trait]
pub trait AccountLookupApi: Send + Sync {
    /// Accounts holding `public_key`, sorted.
    async fn get_key_accounts(
        &self,
        request: GetKeyAccountsRequest,
    ) -> Result<GetKeyAccountsResponse, LookupError>;

    /// Accounts controlled by `controlling_account`, sorted.
    async fn get_controlled_accounts(
        &self,
        request: GetControlledAccountsRequest,
    ) -> Result<GetControlledAccountsResponse, LookupError>;
}
