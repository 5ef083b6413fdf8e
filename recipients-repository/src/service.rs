//! Recipient search service implementation.
//!
//! This module provides the main service for reading, writing and searching list
//! recipients. Application code uses this rather than talking to a provider directly.
//!
//! # Note on Updates
//!
//! `update` is a full replace through the same upsert path as `create`. Fields
//! missing from the new version are dropped from the stored document; there is no
//! partial merge.
//!
//! # Stored Documents
//!
//! Documents read back from the index are returned exactly as stored. Only what
//! is written goes through validation, so a legacy or hand-edited document never
//! breaks a lookup or a result page.

use recipients_shared::{
    build_global_id, default_conditions, Condition, Pagination, RecipientStatus, SearchParams,
    SearchResultPage,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::RecipientSearchServiceConfig;
use crate::errors::RecipientSearchError;
use crate::interfaces::SearchIndexProvider;
use crate::query::{build_from_conditions, build_from_params, SearchRequest};
use crate::types::{DeleteOutcome, FindRecipientRequest};
use crate::utils::omit_empty;
use crate::validation::validate_recipient_document;

/// The main service for interacting with the recipients index.
///
/// Validates input, builds queries and delegates to a `SearchIndexProvider`. Every
/// operation is a single round trip to the provider and the service keeps no state
/// between calls, so one instance can be shared across tasks.
///
/// # Example
///
/// ```no_run
/// use recipients_repository::RecipientSearchService;
/// use recipients_repository::opensearch::{IndexConfig, OpenSearchProvider};
/// use recipients_shared::{Pagination, SearchParams};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Box::new(OpenSearchProvider::new("http://localhost:9200", IndexConfig::default()).await?);
/// let service = RecipientSearchService::new(provider);
///
/// let page = service
///     .search(&SearchParams::new().with_query("john").in_list("L1"))
///     .await?;
/// println!("{} of {}", page.len(), page.total);
///
/// let undeliverable = service.undeliverable_recipients("L1", Pagination::default()).await?;
/// # Ok(())
/// # }
/// ```
pub struct RecipientSearchService {
    provider: Box<dyn SearchIndexProvider>,
    config: RecipientSearchServiceConfig,
}

impl RecipientSearchService {
    /// Create a new RecipientSearchService with default configuration.
    ///
    /// # Arguments
    ///
    /// * `provider` - A boxed implementation of `SearchIndexProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Box<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: RecipientSearchServiceConfig::default(),
        }
    }

    /// Create a new RecipientSearchService with custom configuration.
    pub fn with_config(
        provider: Box<dyn SearchIndexProvider>,
        config: RecipientSearchServiceConfig,
    ) -> Self {
        Self { provider, config }
    }

    fn validate_pagination(&self, pagination: Pagination) -> Result<(), RecipientSearchError> {
        if let Some(max) = self.config.max_result_window {
            if pagination.end() > max {
                return Err(RecipientSearchError::validation(
                    "from",
                    format!(
                        "from + size must be at most {}, got {}",
                        max,
                        pagination.end()
                    ),
                ));
            }
        }
        Ok(())
    }

    fn required(field: &str, value: &str) -> Result<(), RecipientSearchError> {
        if value.is_empty() {
            return Err(RecipientSearchError::validation(field, "is required"));
        }
        Ok(())
    }

    fn id_part<'a>(document: &'a Value, key: &str) -> &'a str {
        document.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Fetch a recipient by list and recipient id.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The stored document, as stored
    /// * `Err(RecipientSearchError::DocumentNotFound)` - If there is no such recipient
    /// * `Err(RecipientSearchError)` - If the lookup fails
    pub async fn find(&self, request: &FindRecipientRequest) -> Result<Value, RecipientSearchError> {
        Self::required("listId", &request.list_id)?;
        Self::required("recipientId", &request.recipient_id)?;

        let id = build_global_id(&request.list_id, &request.recipient_id);
        self.provider.get_document(&id).await
    }

    /// Store a recipient, replacing any previous version.
    ///
    /// Accepts a typed [`recipients_shared::Recipient`] or a raw JSON document.
    /// Empty fields are stripped before the document is validated and written, and
    /// the document id is derived from its `listId` and `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The document as stored
    /// * `Err(RecipientSearchError::ValidationError)` - If the recipient is invalid
    /// * `Err(RecipientSearchError)` - If the write fails
    pub async fn create<T>(&self, recipient: &T) -> Result<Value, RecipientSearchError>
    where
        T: Serialize + ?Sized,
    {
        let document = serde_json::to_value(recipient)
            .map_err(|e| RecipientSearchError::serialization(e.to_string()))?;
        let document = omit_empty(document);
        validate_recipient_document(&document)?;

        let id = build_global_id(
            Self::id_part(&document, "listId"),
            Self::id_part(&document, "id"),
        );
        self.provider.put_document(&id, &document).await?;

        debug!(
            doc_id = %id,
            status = Self::id_part(&document, "status"),
            "Recipient stored"
        );
        Ok(document)
    }

    /// Replace a stored recipient. Same as [`RecipientSearchService::create`].
    pub async fn update<T>(&self, recipient: &T) -> Result<Value, RecipientSearchError>
    where
        T: Serialize + ?Sized,
    {
        self.create(recipient).await
    }

    /// Delete a recipient document by its document id.
    ///
    /// # Returns
    ///
    /// * `Ok(DeleteOutcome::Deleted)` - If the document was removed
    /// * `Ok(DeleteOutcome::AlreadyAbsent)` - If there was nothing to remove
    /// * `Err(RecipientSearchError)` - If the deletion fails
    pub async fn remove(&self, id: &str) -> Result<DeleteOutcome, RecipientSearchError> {
        Self::required("id", id)?;
        self.provider.delete_document(id).await
    }

    /// Match recipients of one list against a condition list.
    ///
    /// The list scope is appended to `conditions`; anything else, such as
    /// [`Condition::subscribed`], is up to the caller.
    pub async fn search_by_list_and_conditions(
        &self,
        list_id: &str,
        conditions: &[Condition],
        pagination: Pagination,
    ) -> Result<SearchResultPage<Value>, RecipientSearchError> {
        Self::required("listId", list_id)?;

        let mut scoped = conditions.to_vec();
        scoped.extend(default_conditions(list_id));
        self.search_by_conditions(&scoped, pagination).await
    }

    /// Match recipients against a condition list, across every list.
    pub async fn search_by_conditions(
        &self,
        conditions: &[Condition],
        pagination: Pagination,
    ) -> Result<SearchResultPage<Value>, RecipientSearchError> {
        self.validate_pagination(pagination)?;
        let request = build_from_conditions(conditions, pagination)?;
        self.run_search(request).await
    }

    /// Search recipients by free text, status and list.
    pub async fn search(
        &self,
        params: &SearchParams,
    ) -> Result<SearchResultPage<Value>, RecipientSearchError> {
        self.validate_pagination(params.pagination())?;
        self.run_search(build_from_params(params)).await
    }

    /// Recipients of a list that bounced, complained or unsubscribed.
    pub async fn undeliverable_recipients(
        &self,
        list_id: &str,
        pagination: Pagination,
    ) -> Result<SearchResultPage<Value>, RecipientSearchError> {
        let params = SearchParams::new()
            .with_status(&RecipientStatus::UNDELIVERABLE[..])
            .in_list(list_id)
            .with_pagination(pagination);
        self.search(&params).await
    }

    async fn run_search(
        &self,
        request: SearchRequest,
    ) -> Result<SearchResultPage<Value>, RecipientSearchError> {
        let hits = self.provider.search(&request.to_json()).await?;
        Ok(SearchResultPage::new(hits.documents, hits.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchHits;
    use async_trait::async_trait;
    use recipients_shared::{Recipient, SubscriptionOrigin};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Mock provider for testing
    struct MockProvider {
        queries: Arc<Mutex<Vec<Value>>>,
        hits: Vec<Value>,
        total: u64,
        should_fail: bool,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                queries: Arc::new(Mutex::new(Vec::new())),
                hits: Vec::new(),
                total: 0,
                should_fail: false,
            }
        }

        fn with_hits(hits: Vec<Value>, total: u64) -> Self {
            Self {
                hits,
                total,
                ..Self::new()
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn ensure_index_exists(&self) -> Result<(), RecipientSearchError> {
            Ok(())
        }

        async fn put_document(
            &self,
            _id: &str,
            _document: &Value,
        ) -> Result<(), RecipientSearchError> {
            if self.should_fail {
                return Err(RecipientSearchError::engine("Mock failure"));
            }
            Ok(())
        }

        async fn delete_document(&self, _id: &str) -> Result<DeleteOutcome, RecipientSearchError> {
            Ok(DeleteOutcome::Deleted)
        }

        async fn get_document(&self, id: &str) -> Result<Value, RecipientSearchError> {
            Err(RecipientSearchError::document_not_found(id))
        }

        async fn search(&self, query: &Value) -> Result<SearchHits, RecipientSearchError> {
            if self.should_fail {
                return Err(RecipientSearchError::engine("Mock failure"));
            }
            self.queries.lock().await.push(query.clone());
            Ok(SearchHits::new(self.hits.clone(), self.total))
        }
    }

    fn recipient_json(id: &str) -> Value {
        json!({
            "listId": "L1",
            "userId": "U1",
            "id": id,
            "email": format!("{}@example.com", id),
            "subscriptionOrigin": "manual",
            "status": "bounced"
        })
    }

    #[tokio::test]
    async fn test_search_reshapes_hits_into_page() {
        let provider = MockProvider::with_hits(vec![recipient_json("a"), recipient_json("b")], 12);
        let service = RecipientSearchService::new(Box::new(provider));

        let page = service.search(&SearchParams::new()).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.items[0]["id"], "a");
        assert_eq!(page.items[1]["status"], "bounced");
    }

    #[tokio::test]
    async fn test_undeliverable_recipients_query() {
        let provider = MockProvider::new();
        let queries = provider.queries.clone();
        let service = RecipientSearchService::new(Box::new(provider));

        service
            .undeliverable_recipients("L1", Pagination::new(5, 25))
            .await
            .unwrap();

        let queries = queries.lock().await;
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0],
            json!({
                "from": 5,
                "size": 25,
                "query": {
                    "bool": {
                        "filter": [
                            { "terms": { "status.keyword": ["bounced", "complaint", "unsubscribed"] } },
                            { "term": { "listId.keyword": "L1" } }
                        ]
                    }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_search_by_list_and_conditions_appends_list_scope() {
        let provider = MockProvider::new();
        let queries = provider.queries.clone();
        let service = RecipientSearchService::new(Box::new(provider));

        service
            .search_by_list_and_conditions(
                "L1",
                &[Condition::subscribed()],
                Pagination::default(),
            )
            .await
            .unwrap();

        let queries = queries.lock().await;
        assert_eq!(
            queries[0]["query"]["bool"]["filter"],
            json!([
                { "match": { "status": "subscribed" } },
                { "match": { "listId": "L1" } }
            ])
        );
    }

    #[tokio::test]
    async fn test_search_by_conditions_rejects_empty_list_without_round_trip() {
        let provider = MockProvider::new();
        let queries = provider.queries.clone();
        let service = RecipientSearchService::new(Box::new(provider));

        let result = service
            .search_by_conditions(&[], Pagination::default())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            RecipientSearchError::ValidationError { .. }
        ));
        assert!(queries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_result_window_is_enforced() {
        let provider = MockProvider::new();
        let service = RecipientSearchService::with_config(
            Box::new(provider),
            RecipientSearchServiceConfig::with_max_result_window(100),
        );

        let params = SearchParams::new().with_pagination(Pagination::new(95, 10));
        let err = service.search(&params).await.unwrap_err();
        assert_eq!(err.field(), Some("from"));

        let params = SearchParams::new().with_pagination(Pagination::new(90, 10));
        assert!(service.search(&params).await.is_ok());
    }

    #[tokio::test]
    async fn test_unlimited_config_skips_window_check() {
        let service = RecipientSearchService::with_config(
            Box::new(MockProvider::new()),
            RecipientSearchServiceConfig::unlimited(),
        );

        let params = SearchParams::new().with_pagination(Pagination::new(1_000_000, 10));
        assert!(service.search(&params).await.is_ok());
    }

    #[tokio::test]
    async fn test_engine_errors_propagate_unchanged() {
        let service = RecipientSearchService::new(Box::new(MockProvider::failing()));

        let err = service.search(&SearchParams::new()).await.unwrap_err();
        assert_eq!(err, RecipientSearchError::engine("Mock failure"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email_before_writing() {
        let service = RecipientSearchService::new(Box::new(MockProvider::failing()));
        let recipient = Recipient::new(
            "L1",
            "U1",
            "r1",
            "not-an-email",
            SubscriptionOrigin::Manual,
            RecipientStatus::Subscribed,
        );

        // The failing provider would answer with an engine error if it were reached
        let err = service.create(&recipient).await.unwrap_err();
        assert_eq!(err.field(), Some("email"));
    }

    #[tokio::test]
    async fn test_create_reports_empty_required_field_as_missing() {
        let service = RecipientSearchService::new(Box::new(MockProvider::new()));
        let recipient = Recipient::new(
            "L1",
            "",
            "r1",
            "r1@example.com",
            SubscriptionOrigin::Manual,
            RecipientStatus::Subscribed,
        );

        let err = service.create(&recipient).await.unwrap_err();
        assert_eq!(
            err,
            RecipientSearchError::validation("userId", "is required")
        );
    }

    #[tokio::test]
    async fn test_find_missing_recipient() {
        let service = RecipientSearchService::new(Box::new(MockProvider::new()));

        let err = service
            .find(&FindRecipientRequest::new("L1", "nobody"))
            .await
            .unwrap_err();
        assert_eq!(err, RecipientSearchError::document_not_found("L1_nobody"));
    }

    #[tokio::test]
    async fn test_find_and_remove_validate_ids() {
        let service = RecipientSearchService::new(Box::new(MockProvider::new()));

        let err = service
            .find(&FindRecipientRequest::new("", "r1"))
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("listId"));

        let err = service.remove("").await.unwrap_err();
        assert_eq!(err.field(), Some("id"));
    }

    #[tokio::test]
    async fn test_stored_documents_are_returned_as_is() {
        let mut odd = recipient_json("b");
        odd["createdAt"] = json!(1500000000000.5);
        odd["status"] = json!("legacyStatus");
        odd.as_object_mut().unwrap().remove("userId");

        let provider = MockProvider::with_hits(vec![recipient_json("a"), odd.clone()], 2);
        let service = RecipientSearchService::new(Box::new(provider));

        let page = service.search(&SearchParams::new()).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items, vec![recipient_json("a"), odd]);
    }

    #[tokio::test]
    async fn test_create_accepts_raw_documents() {
        let service = RecipientSearchService::new(Box::new(MockProvider::new()));

        let mut document = recipient_json("r1");
        document["metadata"] = json!({ "name": "Ann", "nickname": "" });
        let stored = service.create(&document).await.unwrap();
        assert_eq!(stored["metadata"], json!({ "name": "Ann" }));

        document["status"] = json!("complained");
        let err = service.create(&document).await.unwrap_err();
        assert_eq!(err.field(), Some("status"));

        document.as_object_mut().unwrap().remove("userId");
        let err = service.create(&document).await.unwrap_err();
        assert_eq!(err, RecipientSearchError::validation("userId", "is required"));
    }
}
