//! Recipient document types for the search index.
//!
//! This module defines the recipient document as it is stored in the search engine,
//! together with the closed sets of statuses and subscription origins.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Subscription status of a recipient within a list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum RecipientStatus {
    Subscribed,
    AwaitingConfirmation,
    Unsubscribed,
    Bounced,
    Complaint,
}

impl RecipientStatus {
    /// Every status, in declaration order.
    pub const ALL: [RecipientStatus; 5] = [
        RecipientStatus::Subscribed,
        RecipientStatus::AwaitingConfirmation,
        RecipientStatus::Unsubscribed,
        RecipientStatus::Bounced,
        RecipientStatus::Complaint,
    ];

    /// Statuses of recipients that must not receive further deliveries.
    pub const UNDELIVERABLE: [RecipientStatus; 3] = [
        RecipientStatus::Bounced,
        RecipientStatus::Complaint,
        RecipientStatus::Unsubscribed,
    ];

    /// Returns the status as stored in the index.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientStatus::Subscribed => "subscribed",
            RecipientStatus::AwaitingConfirmation => "awaitingConfirmation",
            RecipientStatus::Unsubscribed => "unsubscribed",
            RecipientStatus::Bounced => "bounced",
            RecipientStatus::Complaint => "complaint",
        }
    }

    /// Parse a stored status value.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for RecipientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a recipient ended up in a list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionOrigin {
    SignupForm,
    ListImport,
    Manual,
}

impl SubscriptionOrigin {
    pub const ALL: [SubscriptionOrigin; 3] = [
        SubscriptionOrigin::SignupForm,
        SubscriptionOrigin::ListImport,
        SubscriptionOrigin::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionOrigin::SignupForm => "signupForm",
            SubscriptionOrigin::ListImport => "listImport",
            SubscriptionOrigin::Manual => "manual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|origin| origin.as_str() == value)
    }
}

impl fmt::Display for SubscriptionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the document id of a recipient from its list and recipient ids.
///
/// Uses format: `{list_id}_{recipient_id}`.
///
/// # Example
///
/// ```
/// use recipients_shared::build_global_id;
///
/// assert_eq!(build_global_id("list-1", "abc"), "list-1_abc");
/// ```
pub fn build_global_id(list_id: &str, recipient_id: &str) -> String {
    format!("{}_{}", list_id, recipient_id)
}

/// Document representation of a list recipient.
///
/// Field names are serialized in camelCase, which is how documents are stored in
/// the index. Keys that are not modelled here are kept in `extra` and written back
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub list_id: String,
    pub user_id: String,
    pub id: String,
    pub email: String,
    pub subscription_origin: SubscriptionOrigin,
    pub status: RecipientStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_confirmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    /// User supplied attributes (e.g. `name`, `surname`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed_campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounced_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complained_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipient {
    /// Create a recipient with the required fields set and everything else empty.
    pub fn new(
        list_id: impl Into<String>,
        user_id: impl Into<String>,
        id: impl Into<String>,
        email: impl Into<String>,
        subscription_origin: SubscriptionOrigin,
        status: RecipientStatus,
    ) -> Self {
        Self {
            list_id: list_id.into(),
            user_id: user_id.into(),
            id: id.into(),
            email: email.into(),
            subscription_origin,
            status,
            is_confirmed: None,
            risk_score: None,
            metadata: None,
            system_metadata: None,
            unsubscribed_at: None,
            subscribed_at: None,
            unsubscribed_campaign_id: None,
            bounced_at: None,
            complained_at: None,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// Set a metadata attribute.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// The document id this recipient is stored under.
    pub fn global_id(&self) -> String {
        build_global_id(&self.list_id, &self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in RecipientStatus::ALL {
            assert_eq!(RecipientStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RecipientStatus::parse("complained"), None);
    }

    #[test]
    fn test_status_serializes_as_stored_value() {
        assert_eq!(
            serde_json::to_value(RecipientStatus::AwaitingConfirmation).unwrap(),
            json!("awaitingConfirmation")
        );
        assert_eq!(
            serde_json::to_value(SubscriptionOrigin::SignupForm).unwrap(),
            json!("signupForm")
        );
    }

    #[test]
    fn test_global_id() {
        let recipient = Recipient::new(
            "list-1",
            "user-1",
            "cmVjaXBpZW50",
            "john@example.com",
            SubscriptionOrigin::Manual,
            RecipientStatus::Subscribed,
        );
        assert_eq!(recipient.global_id(), "list-1_cmVjaXBpZW50");
    }

    #[test]
    fn test_serialization_uses_camel_case_and_skips_none() {
        let recipient = Recipient::new(
            "list-1",
            "user-1",
            "r-1",
            "john@example.com",
            SubscriptionOrigin::ListImport,
            RecipientStatus::Subscribed,
        )
        .with_metadata("name", "John");

        let value = serde_json::to_value(&recipient).unwrap();
        assert_eq!(
            value,
            json!({
                "listId": "list-1",
                "userId": "user-1",
                "id": "r-1",
                "email": "john@example.com",
                "subscriptionOrigin": "listImport",
                "status": "subscribed",
                "metadata": { "name": "John" }
            })
        );
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let value = json!({
            "listId": "list-1",
            "userId": "user-1",
            "id": "r-1",
            "email": "john@example.com",
            "subscriptionOrigin": "manual",
            "status": "bounced",
            "bounceType": "Permanent"
        });

        let recipient: Recipient = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(recipient.status, RecipientStatus::Bounced);
        assert_eq!(recipient.extra.get("bounceType"), Some(&json!("Permanent")));
        assert_eq!(serde_json::to_value(&recipient).unwrap(), value);
    }
}
