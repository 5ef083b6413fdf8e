//! Search index provider trait definition.
//!
//! This module defines the document store the recipient service talks to,
//! allowing for different backend implementations (OpenSearch, in-memory fakes, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::RecipientSearchError;
use crate::types::{DeleteOutcome, SearchHits};

/// Abstracts the underlying search engine holding recipient documents.
///
/// Implementations are injected into `RecipientSearchService`. Every method is a
/// single round trip to the engine; implementations must not retry and must report
/// engine failures as `RecipientSearchError::EngineError`.
///
/// # Index Initialization
///
/// Call `ensure_index_exists` during application startup so the index and alias
/// are configured before documents are written.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the recipients index and its alias exist, creating them if necessary.
    async fn ensure_index_exists(&self) -> Result<(), RecipientSearchError>;

    /// Store a document under `id`, replacing any previous version (upsert).
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(RecipientSearchError)` - If the engine rejected the write
    async fn put_document(&self, id: &str, document: &Value) -> Result<(), RecipientSearchError>;

    /// Delete the document stored under `id`.
    ///
    /// A missing document is reported as `DeleteOutcome::AlreadyAbsent`, not as an error.
    async fn delete_document(&self, id: &str) -> Result<DeleteOutcome, RecipientSearchError>;

    /// Fetch the `_source` of the document stored under `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The stored document
    /// * `Err(RecipientSearchError::DocumentNotFound)` - If there is no such document
    /// * `Err(RecipientSearchError)` - If the lookup fails
    async fn get_document(&self, id: &str) -> Result<Value, RecipientSearchError>;

    /// Run a raw query body (`{ from, size, query }`) against the index.
    async fn search(&self, query: &Value) -> Result<SearchHits, RecipientSearchError>;
}
