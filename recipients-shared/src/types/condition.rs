//! Filter condition types.
//!
//! A condition is a single structured filter rule. A list of conditions is applied
//! conjunctively as non-scoring filters, which is how list segments are matched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::recipient::RecipientStatus;

/// Clause type used when a condition does not name one.
pub const DEFAULT_CONDITION_TYPE: &str = "filter";

fn default_condition_type() -> String {
    DEFAULT_CONDITION_TYPE.to_string()
}

/// The rule part of a condition: which query to run against which field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionClause {
    /// Engine query type, e.g. `match`, `term` or `range`.
    pub query_type: String,
    /// Document field the query applies to.
    pub field_to_query: String,
    /// Value handed to the query, any JSON.
    pub search_term: Value,
}

/// A structured filter rule plus its clause type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default = "default_condition_type")]
    pub condition_type: String,
    pub condition: ConditionClause,
}

impl Condition {
    /// Create a `filter` condition.
    ///
    /// # Example
    ///
    /// ```
    /// use recipients_shared::Condition;
    ///
    /// let condition = Condition::filter("match", "metadata.country", "ES");
    /// assert_eq!(condition.condition_type, "filter");
    /// ```
    pub fn filter(
        query_type: impl Into<String>,
        field_to_query: impl Into<String>,
        search_term: impl Into<Value>,
    ) -> Self {
        Self {
            condition_type: default_condition_type(),
            condition: ConditionClause {
                query_type: query_type.into(),
                field_to_query: field_to_query.into(),
                search_term: search_term.into(),
            },
        }
    }

    /// Restrict results to a single list.
    pub fn list_filter(list_id: impl Into<String>) -> Self {
        Self::filter("match", "listId", list_id.into())
    }

    /// Restrict results to subscribed recipients.
    pub fn subscribed() -> Self {
        Self::filter("match", "status", RecipientStatus::Subscribed.as_str())
    }
}

/// Conditions applied to every list-scoped condition search.
pub fn default_conditions(list_id: impl Into<String>) -> Vec<Condition> {
    vec![Condition::list_filter(list_id)]
}
