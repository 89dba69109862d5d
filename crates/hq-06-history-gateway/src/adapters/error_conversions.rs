//! Error conversions from subsystem errors.
//!
//! Backend and encoding failures are internal (500); a missing or
//! hard-failed transaction is 404.

use crate::domain::ApiError;
use hq_03_action_paging::PagingError;
use hq_04_transaction_assembly::AssemblyError;
use hq_05_account_lookup::LookupError;

impl From<PagingError> for ApiError {
    fn from(e: PagingError) -> Self {
        ApiError::internal(e.to_string())
    }
}

impl From<AssemblyError> for ApiError {
    fn from(e: AssemblyError) -> Self {
        if e.is_not_found() {
            ApiError::not_found(e.to_string())
        } else {
            ApiError::internal(e.to_string())
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        ApiError::internal(e.to_string())
    }
}
