//! Query building for recipient searches.
//!
//! Two independent modes produce a [`SearchRequest`]:
//!
//! - [`build_from_conditions`]: a validated condition list rendered as
//!   non-scoring filters, used for segment matching.
//! - [`build_from_params`]: free-text search plus status and list filters,
//!   ranked by relevance.

mod builder;
mod clauses;

pub use builder::{build_from_conditions, build_from_params, LIST_ID_FIELD, STATUS_FIELD};
pub use clauses::{FilterClause, FullTextClause, RecipientQuery, SearchRequest, FULL_TEXT_FIELDS};
