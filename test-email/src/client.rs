//! Email provider interface and its wire types.
//!
//! Requests are shaped after the SES `SendEmail` call, so field names serialize in
//! PascalCase.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    /// Sender address.
    pub source: String,
    pub destination: Destination,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    pub to_addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Message {
    pub body: Body,
    pub subject: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    pub html: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    pub data: String,
}

impl Content {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// What the provider answers for an accepted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailOutput {
    pub message_id: String,
}

/// Error reported by the email provider.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{code}: {message}")]
pub struct DeliveryError {
    /// Provider error code (e.g. `MessageRejected`).
    pub code: String,
    pub message: String,
}

impl DeliveryError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Trait for email providers.
///
/// Implementations deliver one request per call and report the provider's own
/// errors without retrying.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(&self, request: SendEmailRequest)
        -> Result<SendEmailOutput, DeliveryError>;
}
