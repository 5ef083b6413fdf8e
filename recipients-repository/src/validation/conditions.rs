//! Condition list validation.

use recipients_shared::{Condition, ConditionClause};
use serde_json::{Map, Value};

use crate::errors::RecipientSearchError;

const CONDITION_KEYS: [&str; 2] = ["conditionType", "condition"];
const CLAUSE_KEYS: [&str; 3] = ["queryType", "fieldToQuery", "searchTerm"];

/// Validate a raw condition list and normalise it into typed conditions.
///
/// A missing `conditionType` defaults to `"filter"`. Unknown keys are rejected.
/// `searchTerm` must be present but may hold any value, `null` included.
///
/// # Returns
///
/// * `Ok(Vec<Condition>)` - The normalised conditions, in input order
/// * `Err(RecipientSearchError::ValidationError)` - Naming the first offending field
pub fn validate_conditions(candidate: &Value) -> Result<Vec<Condition>, RecipientSearchError> {
    let items = candidate
        .as_array()
        .ok_or_else(|| RecipientSearchError::validation("conditions", "must be an array"))?;

    if items.is_empty() {
        return Err(RecipientSearchError::validation(
            "conditions",
            "must contain at least 1 item",
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_condition(item, &format!("conditions[{}]", i)))
        .collect()
}

/// Validate an already typed condition list.
///
/// Typed conditions can still be empty or carry empty strings.
pub fn validate_condition_list(conditions: &[Condition]) -> Result<(), RecipientSearchError> {
    if conditions.is_empty() {
        return Err(RecipientSearchError::validation(
            "conditions",
            "must contain at least 1 item",
        ));
    }

    for (i, condition) in conditions.iter().enumerate() {
        let path = format!("conditions[{}]", i);
        non_empty(&condition.condition_type, &format!("{}.conditionType", path))?;

        let clause = &condition.condition;
        non_empty(&clause.query_type, &format!("{}.condition.queryType", path))?;
        non_empty(
            &clause.field_to_query,
            &format!("{}.condition.fieldToQuery", path),
        )?;
    }

    Ok(())
}

fn parse_condition(item: &Value, path: &str) -> Result<Condition, RecipientSearchError> {
    let object = as_object(item, path)?;
    reject_unknown_keys(object, &CONDITION_KEYS, path)?;

    let condition_type = match object.get("conditionType") {
        None => "filter".to_string(),
        Some(value) => string_field(value, &format!("{}.conditionType", path))?,
    };

    let clause_path = format!("{}.condition", path);
    let clause = object
        .get("condition")
        .ok_or_else(|| RecipientSearchError::validation(clause_path.as_str(), "is required"))?;
    let clause = as_object(clause, &clause_path)?;
    reject_unknown_keys(clause, &CLAUSE_KEYS, &clause_path)?;

    let query_type = required_string(clause, "queryType", &clause_path)?;
    let field_to_query = required_string(clause, "fieldToQuery", &clause_path)?;
    let search_term = match clause.get("searchTerm") {
        Some(value) => value.clone(),
        _ => {
            return Err(RecipientSearchError::validation(
                format!("{}.searchTerm", clause_path),
                "is required",
            ))
        }
    };

    Ok(Condition {
        condition_type,
        condition: ConditionClause {
            query_type,
            field_to_query,
            search_term,
        },
    })
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, RecipientSearchError> {
    value
        .as_object()
        .ok_or_else(|| RecipientSearchError::validation(path, "must be an object"))
}

fn reject_unknown_keys(
    object: &Map<String, Value>,
    allowed: &[&str],
    path: &str,
) -> Result<(), RecipientSearchError> {
    match object.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(RecipientSearchError::validation(
            format!("{}.{}", path, key),
            "is not allowed",
        )),
        None => Ok(()),
    }
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, RecipientSearchError> {
    let field = format!("{}.{}", path, key);
    match object.get(key) {
        None | Some(Value::Null) => Err(RecipientSearchError::validation(field, "is required")),
        Some(value) => string_field(value, &field),
    }
}

fn string_field(value: &Value, field: &str) -> Result<String, RecipientSearchError> {
    let s = value
        .as_str()
        .ok_or_else(|| RecipientSearchError::validation(field, "must be a string"))?;
    non_empty(s, field)?;
    Ok(s.to_string())
}

fn non_empty(value: &str, field: &str) -> Result<(), RecipientSearchError> {
    if value.is_empty() {
        return Err(RecipientSearchError::validation(
            field,
            "is not allowed to be empty",
        ));
    }
    Ok(())
}
