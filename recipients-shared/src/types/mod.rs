//! This module defines the core data structures used across the recipients search.
//! It re-exports the recipient document, conditions, search parameters and pages.

pub mod condition;
pub mod recipient;
pub mod search_params;
pub mod search_result;

pub use condition::{Condition, ConditionClause};
pub use recipient::{Recipient, RecipientStatus, SubscriptionOrigin};
pub use search_params::{Pagination, SearchParams, StatusFilter};
pub use search_result::SearchResultPage;
