//! Configuration for the test email service.

/// Sender settings supplied by the embedding application.
#[derive(Debug, Clone, PartialEq)]
pub struct TestEmailConfig {
    /// Address test emails are sent from.
    pub sender: String,
}

impl TestEmailConfig {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}
