//! # Recipients Shared
//!
//! This crate defines the data structures shared across the recipients search
//! workspace: the recipient document, filter conditions, search parameters and
//! result pages.

pub mod types;

pub use types::condition::{default_conditions, Condition, ConditionClause};
pub use types::recipient::{build_global_id, Recipient, RecipientStatus, SubscriptionOrigin};
pub use types::search_params::{Pagination, SearchParams, StatusFilter, DEFAULT_PAGE_SIZE};
pub use types::search_result::SearchResultPage;
