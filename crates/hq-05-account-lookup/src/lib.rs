//! # HQ-05 Account Lookup
//!
//! Reverse lookups over the `accounts` stream:
//!
//! - `get_key_accounts`: accounts with the public key in any permission.
//! - `get_controlled_accounts`: accounts with the controller in any
//!   permission.
//!
//! Each lookup is one multi-search with a sub-request per shard. Names from
//! every shard are merged and returned sorted. A failing shard is skipped;
//! if every shard fails the lookup fails.
//!
//! ## Module Structure
//!
//! ```text
//! hq-05-account-lookup/
//! ├── domain/          # Request/response bodies, LookupError
//! ├── ports/           # AccountLookupApi (inbound)
//! └── service.rs       # AccountLookupService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    GetControlledAccountsRequest, GetControlledAccountsResponse, GetKeyAccountsRequest,
    GetKeyAccountsResponse, LookupError, MAX_QUERY_SIZE,
};
pub use ports::AccountLookupApi;
pub use service::AccountLookupService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
