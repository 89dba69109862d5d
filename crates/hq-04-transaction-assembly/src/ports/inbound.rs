//! Inbound port: transaction lookup API.

use crate::domain::{AssemblyError, GetTransactionRequest, TransactionView};
use async_trait::async_trait;

/// Transaction lookups.
#[async_trait]
pub trait TransactionHistoryApi: Send + Sync {
    /// One transaction by id.
    async fn get_transaction(
        &self,
        request: GetTransactionRequest,
    ) -> Result<TransactionView, AssemblyError>;
}
