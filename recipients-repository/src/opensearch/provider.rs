//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsAliasParts, IndicesExistsParts, IndicesPutAliasParts},
    DeleteParts, GetParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::RecipientSearchError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::types::{DeleteOutcome, SearchHits};

/// OpenSearch provider implementation.
///
/// Every operation goes through the configured alias.
///
/// # Example
///
/// ```ignore
/// use recipients_repository::opensearch::{IndexConfig, OpenSearchProvider};
///
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default()).await?;
/// provider.ensure_index_exists().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration containing alias and version
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(RecipientSearchError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, RecipientSearchError> {
        let parsed_url =
            Url::parse(url).map_err(|e| RecipientSearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| RecipientSearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            alias = %index_config.alias,
            version = index_config.version,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Turn a non-success response into an engine error, logging the body.
    async fn engine_error(response: Response, action: &str) -> RecipientSearchError {
        let status = response.status_code();
        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, action = action, "Request failed");
        RecipientSearchError::engine(format!(
            "{} failed with status {}: {}",
            action, status, error_body
        ))
    }

    async fn index_exists(&self, index: &str) -> Result<bool, RecipientSearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| RecipientSearchError::engine(e.to_string()))?;
        Ok(response.status_code().is_success())
    }

    async fn alias_exists(&self) -> Result<bool, RecipientSearchError> {
        let response = self
            .client
            .indices()
            .exists_alias(IndicesExistsAliasParts::Name(&[self.index_config.alias.as_str()]))
            .send()
            .await
            .map_err(|e| RecipientSearchError::engine(e.to_string()))?;
        Ok(response.status_code().is_success())
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    /// Create the versioned index with its mappings and point the alias at it,
    /// skipping whichever already exists.
    async fn ensure_index_exists(&self) -> Result<(), RecipientSearchError> {
        let index_name = self.index_config.versioned_index_name();

        if !self.index_exists(&index_name).await? {
            let response = self
                .client
                .indices()
                .create(IndicesCreateParts::Index(&index_name))
                .body(get_index_settings())
                .send()
                .await
                .map_err(|e| RecipientSearchError::index_creation(e.to_string()))?;

            if !response.status_code().is_success() {
                let status = response.status_code();
                let error_body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %error_body, "Index creation failed");
                return Err(RecipientSearchError::index_creation(format!(
                    "Creating {} failed with status {}: {}",
                    index_name, status, error_body
                )));
            }
            info!(index = %index_name, "Created recipients index");
        }

        if !self.alias_exists().await? {
            let response = self
                .client
                .indices()
                .put_alias(IndicesPutAliasParts::IndexName(
                    &[index_name.as_str()],
                    &self.index_config.alias,
                ))
                .send()
                .await
                .map_err(|e| RecipientSearchError::index_creation(e.to_string()))?;

            if !response.status_code().is_success() {
                let status = response.status_code();
                let error_body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %error_body, "Alias creation failed");
                return Err(RecipientSearchError::index_creation(format!(
                    "Creating alias {} failed with status {}: {}",
                    self.index_config.alias, status, error_body
                )));
            }
            info!(index = %index_name, alias = %self.index_config.alias, "Created recipients alias");
        }

        Ok(())
    }

    async fn put_document(&self, id: &str, document: &Value) -> Result<(), RecipientSearchError> {
        // The index API replaces the whole document, creating it if needed
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.alias, id))
            .body(document.clone())
            .send()
            .await
            .map_err(|e| RecipientSearchError::engine(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(Self::engine_error(response, "Index document").await);
        }

        debug!(doc_id = %id, "Document stored");
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<DeleteOutcome, RecipientSearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_config.alias, id))
            .send()
            .await
            .map_err(|e| RecipientSearchError::engine(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if status.as_u16() == 404 {
            debug!(doc_id = %id, "Document already absent");
            return Ok(DeleteOutcome::AlreadyAbsent);
        }
        if !status.is_success() {
            return Err(Self::engine_error(response, "Delete document").await);
        }

        debug!(doc_id = %id, "Document deleted");
        Ok(DeleteOutcome::Deleted)
    }

    async fn get_document(&self, id: &str) -> Result<Value, RecipientSearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(&self.index_config.alias, id))
            .send()
            .await
            .map_err(|e| RecipientSearchError::engine(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(RecipientSearchError::document_not_found(id));
        }
        if !status.is_success() {
            return Err(Self::engine_error(response, "Get document").await);
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| RecipientSearchError::parse(e.to_string()))?;

        match body.get_mut("_source") {
            Some(source) => Ok(source.take()),
            None => Err(RecipientSearchError::document_not_found(id)),
        }
    }

    async fn search(&self, query: &Value) -> Result<SearchHits, RecipientSearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.alias.as_str()]))
            .body(query.clone())
            .send()
            .await
            .map_err(|e| RecipientSearchError::engine(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(Self::engine_error(response, "Search").await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RecipientSearchError::parse(e.to_string()))?;

        let hits = SearchHits::from_response(body)?;
        debug!(
            total = hits.total,
            returned = hits.documents.len(),
            "Search completed"
        );
        Ok(hits)
    }
}
