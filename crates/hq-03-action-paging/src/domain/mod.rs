//! # Domain Layer
//!
//! Request windows, wire types and errors for action paging.

pub mod errors;
pub mod types;
pub mod window;

pub use errors::PagingError;
pub use types::{
    ActionEntry, FindActionsRequest, FindActionsResponse, GetActionsRequest, GetActionsResponse,
    MAX_FIND_ACTIONS_RESULTS,
};
pub use window::{PageRequest, PageWindow, DEFAULT_OFFSET, DEFAULT_POS};
