//! Utility functions for the recipients repository.

use serde_json::Value;

/// Recursively strip empty values from a JSON document.
///
/// Empty strings, empty arrays, empty objects and nulls are removed from objects
/// and arrays. Containers that become empty once their children are stripped are
/// removed as well. Numbers (including zero) and booleans are kept.
///
/// A top-level value that is itself empty becomes `Value::Null`.
///
/// # Example
///
/// ```
/// use recipients_repository::utils::omit_empty;
/// use serde_json::json;
///
/// let doc = omit_empty(json!({ "email": "a@b.io", "metadata": { "name": "" }, "riskScore": 0 }));
/// assert_eq!(doc, json!({ "email": "a@b.io", "riskScore": 0 }));
/// ```
pub fn omit_empty(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let stripped: serde_json::Map<String, Value> = map
                .into_iter()
                .map(|(key, value)| (key, omit_empty(value)))
                .filter(|(_, value)| !is_empty(value))
                .collect();
            if stripped.is_empty() {
                Value::Null
            } else {
                Value::Object(stripped)
            }
        }
        Value::Array(items) => {
            let stripped: Vec<Value> = items
                .into_iter()
                .map(omit_empty)
                .filter(|value| !is_empty(value))
                .collect();
            if stripped.is_empty() {
                Value::Null
            } else {
                Value::Array(stripped)
            }
        }
        Value::String(s) if s.is_empty() => Value::Null,
        other => other,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
