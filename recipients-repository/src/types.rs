//! Request and response types for recipient index operations.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::RecipientSearchError;

/// Request to fetch a single recipient of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRecipientRequest {
    /// The list the recipient belongs to.
    pub list_id: String,
    /// The recipient's identifier within the list.
    pub recipient_id: String,
}

impl FindRecipientRequest {
    pub fn new(list_id: impl Into<String>, recipient_id: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            recipient_id: recipient_id.into(),
        }
    }
}

/// Outcome of a delete.
///
/// Deleting a document that is not in the index is not an error, but callers can
/// still tell the two cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The document existed and was removed.
    Deleted,
    /// There was no document with that id.
    AlreadyAbsent,
}

/// Documents and total count of a search, as returned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHits {
    /// The `_source` of every hit, in engine order.
    pub documents: Vec<Value>,
    /// Total number of matching documents.
    pub total: u64,
}

#[derive(Deserialize)]
struct RawSearchResponse {
    hits: RawHits,
}

#[derive(Deserialize)]
struct RawHits {
    total: RawTotal,
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// Legacy engines report a bare integer, current ones `{ value, relation }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Count(u64),
    Object { value: u64 },
}

#[derive(Deserialize)]
struct RawHit {
    #[serde(rename = "_source", default)]
    source: Value,
}

impl SearchHits {
    pub fn new(documents: Vec<Value>, total: u64) -> Self {
        Self { documents, total }
    }

    /// Extract hits from a raw search response body.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchHits)` - The `_source` documents and the total count
    /// * `Err(RecipientSearchError::ParseError)` - If the body is not a search response
    pub fn from_response(body: Value) -> Result<Self, RecipientSearchError> {
        let response: RawSearchResponse = serde_json::from_value(body)
            .map_err(|e| RecipientSearchError::parse(format!("Invalid search response: {}", e)))?;

        let total = match response.hits.total {
            RawTotal::Count(total) => total,
            RawTotal::Object { value } => value,
        };

        Ok(Self {
            documents: response.hits.hits.into_iter().map(|hit| hit.source).collect(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_with_total_object() {
        let body = json!({
            "took": 3,
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [
                    { "_id": "L1_a", "_source": { "id": "a" } },
                    { "_id": "L1_b", "_source": { "id": "b" } }
                ]
            }
        });

        let hits = SearchHits::from_response(body).unwrap();
        assert_eq!(hits.total, 42);
        assert_eq!(hits.documents, vec![json!({ "id": "a" }), json!({ "id": "b" })]);
    }

    #[test]
    fn test_from_response_with_legacy_total() {
        let body = json!({ "hits": { "total": 7, "hits": [] } });

        let hits = SearchHits::from_response(body).unwrap();
        assert_eq!(hits.total, 7);
        assert!(hits.documents.is_empty());
    }

    #[test]
    fn test_from_response_rejects_other_bodies() {
        let result = SearchHits::from_response(json!({ "error": "index_not_found_exception" }));
        assert!(matches!(
            result.unwrap_err(),
            RecipientSearchError::ParseError(_)
        ));
    }
}
