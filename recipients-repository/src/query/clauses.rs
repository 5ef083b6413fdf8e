//! Query clause types and their wire representation.

use serde_json::{json, Value};

/// Fields searched by the free-text clause.
pub const FULL_TEXT_FIELDS: [&str; 3] = ["email", "metadata.name", "metadata.surname"];

/// A non-scoring constraint a document must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Field equals any of the values.
    Terms { field: String, values: Vec<Value> },
    /// Field equals the value exactly.
    Term { field: String, value: Value },
    /// Caller supplied rule: `{ <query_type>: { <field>: <term> } }`.
    Rule {
        query_type: String,
        field: String,
        term: Value,
    },
}

impl FilterClause {
    pub fn to_json(&self) -> Value {
        match self {
            FilterClause::Terms { field, values } => json!({ "terms": { field.as_str(): values } }),
            FilterClause::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            FilterClause::Rule {
                query_type,
                field,
                term,
            } => json!({ query_type.as_str(): { field.as_str(): term } }),
        }
    }
}

/// Free-text clause: an exact phrase match OR a phrase-prefix match over
/// [`FULL_TEXT_FIELDS`]. Contributes to relevance scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct FullTextClause {
    pub query: String,
}

impl FullTextClause {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        let strategies: Vec<Value> = ["phrase", "phrase_prefix"]
            .iter()
            .map(|match_type| {
                json!({
                    "multi_match": {
                        "query": self.query,
                        "type": match_type,
                        "fields": FULL_TEXT_FIELDS,
                    }
                })
            })
            .collect();

        json!({ "bool": { "should": strategies } })
    }
}

/// Shape of a recipient query before it is serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipientQuery {
    /// No constraints.
    MatchAll,
    /// Filter clauses only, no scoring.
    FilterOnly(Vec<FilterClause>),
    /// Free-text clause only.
    ScoredOnly(FullTextClause),
    /// Free-text clause required on top of the filters.
    ScoredAndFiltered {
        full_text: FullTextClause,
        filters: Vec<FilterClause>,
    },
}

impl RecipientQuery {
    /// Pick the variant for an optional free-text clause and a filter set.
    pub fn from_parts(full_text: Option<FullTextClause>, filters: Vec<FilterClause>) -> Self {
        match (full_text, filters.is_empty()) {
            (None, true) => RecipientQuery::MatchAll,
            (None, false) => RecipientQuery::FilterOnly(filters),
            (Some(full_text), true) => RecipientQuery::ScoredOnly(full_text),
            (Some(full_text), false) => RecipientQuery::ScoredAndFiltered { full_text, filters },
        }
    }

    pub fn filters(&self) -> &[FilterClause] {
        match self {
            RecipientQuery::FilterOnly(filters)
            | RecipientQuery::ScoredAndFiltered { filters, .. } => filters,
            _ => &[],
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            RecipientQuery::MatchAll => json!({ "match_all": {} }),
            RecipientQuery::FilterOnly(filters) => {
                json!({ "bool": { "filter": filters_json(filters) } })
            }
            RecipientQuery::ScoredOnly(full_text) => {
                json!({ "bool": { "must": [full_text.to_json()] } })
            }
            RecipientQuery::ScoredAndFiltered { full_text, filters } => json!({
                "bool": {
                    "must": [full_text.to_json()],
                    "filter": filters_json(filters),
                }
            }),
        }
    }
}

fn filters_json(filters: &[FilterClause]) -> Vec<Value> {
    filters.iter().map(FilterClause::to_json).collect()
}

/// A paginated query, ready to be sent to the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub from: usize,
    pub size: usize,
    pub query: RecipientQuery,
}

impl SearchRequest {
    /// The request body: `{ from, size, query }`.
    pub fn to_json(&self) -> Value {
        json!({
            "from": self.from,
            "size": self.size,
            "query": self.query.to_json(),
        })
    }
}
