//! # Domain Layer

pub mod errors;
pub mod types;

pub use errors::LookupError;
pub use types::{
    GetControlledAccountsRequest, GetControlledAccountsResponse, GetKeyAccountsRequest,
    GetKeyAccountsResponse, MAX_QUERY_SIZE,
};
