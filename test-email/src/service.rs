//! Test email service.
//!
//! Sends the body and subject of a campaign to a few addresses so it can be
//! previewed before going out. The subject is prefixed with `[TEST] `.

use serde::Deserialize;
use tracing::debug;

use crate::client::{
    Body, Content, Destination, EmailClient, Message, SendEmailOutput, SendEmailRequest,
};
use crate::config::TestEmailConfig;
use crate::errors::TestEmailError;

/// Prefix added to the subject of every test email.
pub const TEST_SUBJECT_PREFIX: &str = "[TEST] ";

/// What to send and to whom.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SendTestEmailParams {
    pub body: Option<String>,
    pub subject: Option<String>,
    pub emails: Option<Vec<String>>,
}

impl SendTestEmailParams {
    pub fn new(
        body: impl Into<String>,
        subject: impl Into<String>,
        emails: Vec<String>,
    ) -> Self {
        Self {
            body: Some(body.into()),
            subject: Some(subject.into()),
            emails: Some(emails),
        }
    }
}

struct CheckedParams<'a> {
    body: &'a str,
    subject: &'a str,
    emails: &'a [String],
}

pub struct SendTestEmailService {
    client: Box<dyn EmailClient>,
    config: TestEmailConfig,
}

impl SendTestEmailService {
    pub fn new(client: Box<dyn EmailClient>, config: TestEmailConfig) -> Self {
        Self { client, config }
    }

    /// Check the params, build the provider request and deliver it.
    ///
    /// Stops at the first failing step. Provider errors are returned as reported.
    pub async fn send_email(
        &self,
        params: &SendTestEmailParams,
    ) -> Result<SendEmailOutput, TestEmailError> {
        debug!(emails = ?params.emails, "Sending test email");

        let checked = Self::check_params(params)?;
        let request = self.build_request(&checked);

        debug!(
            source = %request.source,
            recipients = request.destination.to_addresses.len(),
            "Delivering test email"
        );
        let output = self.client.send_email(request).await?;
        Ok(output)
    }

    fn check_params(params: &SendTestEmailParams) -> Result<CheckedParams<'_>, TestEmailError> {
        let body = params.body.as_deref().filter(|b| !b.is_empty());
        let subject = params.subject.as_deref().filter(|s| !s.is_empty());
        let emails = params.emails.as_deref().filter(|e| !e.is_empty());

        match (body, subject, emails) {
            (Some(body), Some(subject), Some(emails)) => Ok(CheckedParams {
                body,
                subject,
                emails,
            }),
            _ => {
                let mut missing = Vec::new();
                if body.is_none() {
                    missing.push("body");
                }
                if subject.is_none() {
                    missing.push("subject");
                }
                if emails.is_none() {
                    missing.push("emails");
                }
                Err(TestEmailError::MissingParams(missing))
            }
        }
    }

    fn build_request(&self, params: &CheckedParams<'_>) -> SendEmailRequest {
        SendEmailRequest {
            source: self.config.sender.clone(),
            destination: Destination {
                to_addresses: params.emails.to_vec(),
            },
            message: Message {
                body: Body {
                    html: Content::new(params.body),
                },
                subject: Content::new(format!("{}{}", TEST_SUBJECT_PREFIX, params.subject)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DeliveryError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Mock client for testing
    struct MockClient {
        sent: Arc<Mutex<Vec<SendEmailRequest>>>,
        reject_with: Option<DeliveryError>,
    }

    impl MockClient {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                reject_with: None,
            }
        }

        fn rejecting(err: DeliveryError) -> Self {
            Self {
                reject_with: Some(err),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl EmailClient for MockClient {
        async fn send_email(
            &self,
            request: SendEmailRequest,
        ) -> Result<SendEmailOutput, DeliveryError> {
            if let Some(err) = &self.reject_with {
                return Err(err.clone());
            }
            self.sent.lock().await.push(request);
            Ok(SendEmailOutput {
                message_id: "msg-1".to_string(),
            })
        }
    }

    fn service(client: MockClient) -> SendTestEmailService {
        SendTestEmailService::new(
            Box::new(client),
            TestEmailConfig::new("noreply@example.com"),
        )
    }

    #[tokio::test]
    async fn test_sends_prefixed_subject() {
        let client = MockClient::new();
        let sent = client.sent.clone();
        let service = service(client);

        let params = SendTestEmailParams::new(
            "<h1>Spring sale</h1>",
            "Spring sale",
            vec!["a@example.com".to_string(), "b@example.com".to_string()],
        );
        let output = service.send_email(&params).await.unwrap();
        assert_eq!(output.message_id, "msg-1");

        let sent = sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].source, "noreply@example.com");
        assert_eq!(sent[0].message.subject.data, "[TEST] Spring sale");
        assert_eq!(sent[0].message.body.html.data, "<h1>Spring sale</h1>");
        assert_eq!(
            sent[0].destination.to_addresses,
            vec!["a@example.com", "b@example.com"]
        );
    }

    #[tokio::test]
    async fn test_missing_params_are_named() {
        let client = MockClient::new();
        let sent = client.sent.clone();
        let service = service(client);

        let params = SendTestEmailParams {
            body: Some("<p>x</p>".to_string()),
            subject: Some(String::new()),
            emails: Some(vec![]),
        };
        let err = service.send_email(&params).await.unwrap_err();
        assert_eq!(err, TestEmailError::MissingParams(vec!["subject", "emails"]));

        let err = service
            .send_email(&SendTestEmailParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Params missing: body, subject, emails");

        assert!(sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_delivery_errors_surface_unchanged() {
        let rejection = DeliveryError::new("MessageRejected", "Email address is not verified");
        let service = service(MockClient::rejecting(rejection.clone()));

        let params =
            SendTestEmailParams::new("<p>x</p>", "Hi", vec!["a@example.com".to_string()]);
        let err = service.send_email(&params).await.unwrap_err();

        assert_eq!(err, TestEmailError::Delivery(rejection.clone()));
        assert_eq!(err.to_string(), rejection.to_string());
    }

    #[test]
    fn test_params_deserialize_from_request_body() {
        let params: SendTestEmailParams = serde_json::from_value(serde_json::json!({
            "body": "<p>x</p>",
            "subject": "Hi",
            "emails": ["a@example.com"]
        }))
        .unwrap();
        assert_eq!(
            params,
            SendTestEmailParams::new("<p>x</p>", "Hi", vec!["a@example.com".to_string()])
        );
    }
}
