//! Input validation for condition lists and recipient documents.
//!
//! Validation is plain functions returning `RecipientSearchError::ValidationError`
//! with the path of the offending field. It runs before anything reaches the
//! query builder or the search engine.

pub mod conditions;
pub mod recipient;

pub use conditions::{validate_condition_list, validate_conditions};
pub use recipient::validate_recipient_document;
