//! # Recipients Repository
//!
//! This crate provides query building, validation and storage access for list
//! recipients kept in a search index. It includes definitions for errors,
//! interfaces, the query model, and a concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod query;
pub mod service;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::RecipientSearchServiceConfig;
pub use errors::RecipientSearchError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider};
pub use query::{build_from_conditions, build_from_params, RecipientQuery, SearchRequest};
pub use service::RecipientSearchService;
pub use types::{DeleteOutcome, FindRecipientRequest, SearchHits};
pub use utils::omit_empty;
pub use validation::{validate_condition_list, validate_conditions, validate_recipient_document};
