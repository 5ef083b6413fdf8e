//! Recipient search error types.
//!
//! This module defines the unified error type for recipient index operations,
//! covering input validation, missing documents and engine-side failures.

use thiserror::Error;

/// Unified errors from recipient index operations.
///
/// Used by the `SearchIndexProvider` trait and `RecipientSearchService`. None of
/// these errors is retried by this crate; engine failures are propagated as they
/// were reported.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecipientSearchError {
    /// Malformed condition list, recipient document or page request.
    #[error("Validation error on `{field}`: {reason}")]
    ValidationError { field: String, reason: String },

    /// Point lookup of a document that is not in the index.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Transport failure or non-success response from the search engine.
    #[error("Engine error: {0}")]
    EngineError(String),

    /// Failed to create the recipients index or its alias.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a response or a stored document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RecipientSearchError {
    /// Create a validation error for a field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a document not found error.
    pub fn document_not_found(id: impl Into<String>) -> Self {
        Self::DocumentNotFound(id.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an engine error.
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::EngineError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// The offending field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
