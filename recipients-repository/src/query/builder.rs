//! Query construction from condition lists and from search parameters.
//!
//! Both builders are pure: they take immutable inputs and return a new
//! [`SearchRequest`] without touching the search engine.

use recipients_shared::{Condition, Pagination, SearchParams};
use serde_json::Value;
use tracing::debug;

use super::clauses::{FilterClause, FullTextClause, RecipientQuery, SearchRequest};
use crate::errors::RecipientSearchError;
use crate::validation::validate_condition_list;

/// Keyword sub-field the status filter matches against.
pub const STATUS_FIELD: &str = "status.keyword";

/// Keyword sub-field the list scope matches against.
pub const LIST_ID_FIELD: &str = "listId.keyword";

/// Build a filter-only query with one filter clause per condition.
///
/// Conditions are rendered as `{ <queryType>: { <fieldToQuery>: <searchTerm> } }`
/// in input order. List scoping is not added here; callers compose
/// [`recipients_shared::default_conditions`] explicitly.
///
/// # Returns
///
/// * `Ok(SearchRequest)` - A `FilterOnly` query carrying `pagination`
/// * `Err(RecipientSearchError::ValidationError)` - If the conditions are invalid
pub fn build_from_conditions(
    conditions: &[Condition],
    pagination: Pagination,
) -> Result<SearchRequest, RecipientSearchError> {
    validate_condition_list(conditions)?;

    let filters = conditions
        .iter()
        .map(|condition| {
            if condition.condition_type != "filter" {
                debug!(
                    condition_type = %condition.condition_type,
                    "Condition rendered as filter clause"
                );
            }
            FilterClause::Rule {
                query_type: condition.condition.query_type.clone(),
                field: condition.condition.field_to_query.clone(),
                term: condition.condition.search_term.clone(),
            }
        })
        .collect();

    Ok(SearchRequest {
        from: pagination.from,
        size: pagination.size,
        query: RecipientQuery::FilterOnly(filters),
    })
}

/// Build a query from the user-facing search parameters.
///
/// - `status` becomes a `terms` filter (a single status is a one-element set).
/// - `list_id` becomes a `term` filter.
/// - `q` becomes a scoring clause that must match when filters are present too.
/// - With none of them the query matches every document.
///
/// Empty strings and empty status lists count as absent.
pub fn build_from_params(params: &SearchParams) -> SearchRequest {
    let mut filters = Vec::new();

    if let Some(status) = &params.status {
        let values = status.values();
        if !values.is_empty() {
            filters.push(FilterClause::Terms {
                field: STATUS_FIELD.to_string(),
                values: values.into_iter().map(Value::String).collect(),
            });
        }
    }

    if let Some(list_id) = params.list_id.as_deref().filter(|id| !id.is_empty()) {
        filters.push(FilterClause::Term {
            field: LIST_ID_FIELD.to_string(),
            value: Value::String(list_id.to_string()),
        });
    }

    let full_text = params
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(FullTextClause::new);

    SearchRequest {
        from: params.from,
        size: params.size,
        query: RecipientQuery::from_parts(full_text, filters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipients_shared::{default_conditions, RecipientStatus};
    use serde_json::json;

    #[test]
    fn test_conditions_become_one_filter_each() {
        let conditions = vec![
            Condition::filter("match", "metadata.country", "ES"),
            Condition::filter("range", "riskScore", json!({ "lt": 3 })),
        ];

        let request = build_from_conditions(&conditions, Pagination::new(20, 5)).unwrap();

        assert_eq!(
            request.to_json(),
            json!({
                "from": 20,
                "size": 5,
                "query": {
                    "bool": {
                        "filter": [
                            { "match": { "metadata.country": "ES" } },
                            { "range": { "riskScore": { "lt": 3 } } }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_appended_scope_adds_exactly_one_filter() {
        let mut conditions = vec![
            Condition::subscribed(),
            Condition::filter("match", "metadata.country", "ES"),
            Condition::filter("exists", "field", "email"),
        ];
        conditions.extend(default_conditions("L1"));

        let request = build_from_conditions(&conditions, Pagination::default()).unwrap();

        assert_eq!(request.query.filters().len(), 4);
        assert_eq!(
            request.query.filters().last().unwrap().to_json(),
            json!({ "match": { "listId": "L1" } })
        );
        assert_eq!((request.from, request.size), (0, 10));
    }

    #[test]
    fn test_conditions_must_validate() {
        let err = build_from_conditions(&[], Pagination::default()).unwrap_err();
        assert_eq!(err.field(), Some("conditions"));

        let err = build_from_conditions(
            &[Condition::filter("", "status", "x")],
            Pagination::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("conditions[0].condition.queryType"));
    }

    #[test]
    fn test_no_params_matches_everything() {
        let request = build_from_params(&SearchParams::default());
        assert_eq!(
            request.to_json(),
            json!({ "from": 0, "size": 10, "query": { "match_all": {} } })
        );

        let params = SearchParams {
            q: Some(String::new()),
            list_id: Some(String::new()),
            status: Some("".into()),
            from: 30,
            size: 15,
        };
        assert_eq!(
            build_from_params(&params).to_json(),
            json!({ "from": 30, "size": 15, "query": { "match_all": {} } })
        );
    }

    #[test]
    fn test_single_status_is_a_one_element_set() {
        let request = build_from_params(&SearchParams::new().with_status("bounced"));
        assert_eq!(
            request.to_json()["query"],
            json!({ "bool": { "filter": [{ "terms": { "status.keyword": ["bounced"] } }] } })
        );
    }

    #[test]
    fn test_status_and_list_filters_are_anded() {
        let request = build_from_params(
            &SearchParams::new()
                .with_status(&RecipientStatus::UNDELIVERABLE[..])
                .in_list("L1"),
        );
        assert_eq!(
            request.to_json()["query"],
            json!({
                "bool": {
                    "filter": [
                        { "terms": { "status.keyword": ["bounced", "complaint", "unsubscribed"] } },
                        { "term": { "listId.keyword": "L1" } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_query_only_is_scored() {
        let request = build_from_params(&SearchParams::new().with_query("john"));
        let query = request.to_json()["query"].clone();

        assert!(query["bool"].get("filter").is_none());
        assert_eq!(query["bool"]["must"].as_array().unwrap().len(), 1);
        assert_eq!(
            query["bool"]["must"][0]["bool"]["should"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_query_and_status_require_both() {
        let request = build_from_params(
            &SearchParams::new()
                .with_query("jo")
                .with_status("subscribed")
                .with_pagination(Pagination::new(10, 10)),
        );

        assert_eq!(
            request.to_json(),
            json!({
                "from": 10,
                "size": 10,
                "query": {
                    "bool": {
                        "must": [{
                            "bool": {
                                "should": [
                                    { "multi_match": { "query": "jo", "type": "phrase", "fields": ["email", "metadata.name", "metadata.surname"] } },
                                    { "multi_match": { "query": "jo", "type": "phrase_prefix", "fields": ["email", "metadata.name", "metadata.surname"] } }
                                ]
                            }
                        }],
                        "filter": [{ "terms": { "status.keyword": ["subscribed"] } }]
                    }
                }
            })
        );
    }
}
