//! Error types for the recipients repository.
//!
//! This module provides a unified error type for all recipient index operations.

mod recipient_search_error;

pub use recipient_search_error::RecipientSearchError;
