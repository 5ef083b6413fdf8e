//! Recipient document validation.
//!
//! Runs on the document that is about to be written, after empty fields have been
//! stripped, so an empty required string is reported as missing.

use lazy_static::lazy_static;
use recipients_shared::{RecipientStatus, SubscriptionOrigin};
use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::RecipientSearchError;

lazy_static! {
    static ref EMAIL_REGEXP: Regex = Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#
    )
    .unwrap();
    static ref METADATA_KEY_REGEXP: Regex = Regex::new(r"^[A-Za-z_]+[A-Za-z0-9_]*$").unwrap();
}

const REQUIRED_IDS: [&str; 3] = ["listId", "userId", "id"];
const TIMESTAMPS: [&str; 6] = [
    "unsubscribedAt",
    "subscribedAt",
    "bouncedAt",
    "complainedAt",
    "createdAt",
    "updatedAt",
];
const METADATA_MAPS: [&str; 2] = ["metadata", "systemMetadata"];

/// Returns true if `email` is a syntactically valid address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEXP.is_match(email)
}

/// Validate a recipient document.
///
/// Keys that are not part of the recipient schema are allowed and left alone.
///
/// # Returns
///
/// * `Ok(())` - If the document can be stored
/// * `Err(RecipientSearchError::ValidationError)` - Naming the first offending field
pub fn validate_recipient_document(document: &Value) -> Result<(), RecipientSearchError> {
    let object = document
        .as_object()
        .ok_or_else(|| RecipientSearchError::validation("recipient", "must be an object"))?;

    for key in REQUIRED_IDS {
        required_str(object, key)?;
    }

    let email = required_str(object, "email")?;
    if !is_valid_email(email) {
        return Err(RecipientSearchError::validation(
            "email",
            format!("'{}' is not a valid email address", email),
        ));
    }

    let origin = required_str(object, "subscriptionOrigin")?;
    if SubscriptionOrigin::parse(origin).is_none() {
        return Err(RecipientSearchError::validation(
            "subscriptionOrigin",
            format!(
                "must be one of [{}]",
                joined(SubscriptionOrigin::ALL.iter().map(|o| o.as_str()))
            ),
        ));
    }

    let status = required_str(object, "status")?;
    if RecipientStatus::parse(status).is_none() {
        return Err(RecipientSearchError::validation(
            "status",
            format!(
                "must be one of [{}]",
                joined(RecipientStatus::ALL.iter().map(|s| s.as_str()))
            ),
        ));
    }

    if let Some(value) = object.get("isConfirmed") {
        if !value.is_boolean() {
            return Err(RecipientSearchError::validation(
                "isConfirmed",
                "must be a boolean",
            ));
        }
    }

    for key in TIMESTAMPS.iter().chain(std::iter::once(&"riskScore")) {
        if let Some(value) = object.get(*key) {
            if !value.is_number() {
                return Err(RecipientSearchError::validation(*key, "must be a number"));
            }
        }
    }

    if let Some(value) = object.get("unsubscribedCampaignId") {
        if !value.is_string() {
            return Err(RecipientSearchError::validation(
                "unsubscribedCampaignId",
                "must be a string",
            ));
        }
    }

    for key in METADATA_MAPS {
        if let Some(value) = object.get(key) {
            validate_metadata(value, key)?;
        }
    }

    Ok(())
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, RecipientSearchError> {
    match object.get(key) {
        None | Some(Value::Null) => Err(RecipientSearchError::validation(key, "is required")),
        Some(Value::String(s)) if s.is_empty() => {
            Err(RecipientSearchError::validation(key, "is required"))
        }
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(RecipientSearchError::validation(key, "must be a string")),
    }
}

fn validate_metadata(value: &Value, field: &str) -> Result<(), RecipientSearchError> {
    let map = value
        .as_object()
        .ok_or_else(|| RecipientSearchError::validation(field, "must be an object"))?;

    for (key, value) in map {
        if !METADATA_KEY_REGEXP.is_match(key) {
            return Err(RecipientSearchError::validation(
                format!("{}.{}", field, key),
                "is not an allowed metadata key",
            ));
        }
        if value.is_null() {
            return Err(RecipientSearchError::validation(
                format!("{}.{}", field, key),
                "is required",
            ));
        }
    }

    Ok(())
}

fn joined<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
