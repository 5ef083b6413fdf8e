use thiserror::Error;

use crate::client::DeliveryError;

/// Errors from sending a test email.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TestEmailError {
    /// One or more of `body`, `subject` and `emails` were missing or empty.
    #[error("Params missing: {}", .0.join(", "))]
    MissingParams(Vec<&'static str>),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
