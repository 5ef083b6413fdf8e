//! Error types for the recipients search binary.

use recipients_repository::RecipientSearchError;
use thiserror::Error;

/// Errors that can occur while configuring or running a command.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid environment or failed startup.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unknown command or malformed arguments.
    #[error("Usage error: {0}")]
    UsageError(String),

    #[error(transparent)]
    Search(#[from] RecipientSearchError),

    /// Failed to render a result.
    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::UsageError(msg.into())
    }
}
