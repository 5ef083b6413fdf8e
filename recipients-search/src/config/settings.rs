//! Settings loaded from the environment.

use std::env;
use std::time::Duration;
use tracing::warn;

use crate::AppError;
use recipients_repository::config::DEFAULT_MAX_RESULT_WINDOW;
use recipients_repository::opensearch::{IndexConfig, INDEX_NAME};
use recipients_repository::RecipientSearchServiceConfig;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection at a fixed interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Anything else falls back to fail-fast.
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            None | Some("fail-fast") | Some("failfast") | Some("fail_fast") => Self::FailFast,
            Some("retry") => Self::Retry,
            Some(other) => {
                warn!(
                    value = other,
                    "Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'fail-fast'"
                );
                Self::FailFast
            }
        }
    }
}

/// Everything the binary reads from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub opensearch_url: String,
    pub index_config: IndexConfig,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    pub service_config: RecipientSearchServiceConfig,
}

impl Settings {
    /// Load settings from process environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `RECIPIENTS_INDEX_ALIAS`: Index alias name (default: "recipients")
    /// - `RECIPIENTS_INDEX_VERSION`: Index version number (default: 0)
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: fail-fast)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `RECIPIENTS_MAX_RESULT_WINDOW`: Largest `from + size` accepted (default: 10000)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());

        let index_alias =
            lookup("RECIPIENTS_INDEX_ALIAS").unwrap_or_else(|| INDEX_NAME.to_string());
        let index_version = parse_number(&lookup, "RECIPIENTS_INDEX_VERSION", 0u32)?;

        let connection_mode =
            ConnectionMode::parse(lookup("OPENSEARCH_CONNECTION_MODE").as_deref());
        let retry_interval = parse_number(
            &lookup,
            "OPENSEARCH_RETRY_INTERVAL_SECS",
            DEFAULT_RETRY_INTERVAL_SECS,
        )?;

        let max_result_window = parse_number(
            &lookup,
            "RECIPIENTS_MAX_RESULT_WINDOW",
            DEFAULT_MAX_RESULT_WINDOW,
        )?;

        Ok(Self {
            opensearch_url,
            index_config: IndexConfig::new(index_alias, index_version),
            connection_mode,
            retry_interval: Duration::from_secs(retry_interval),
            service_config: RecipientSearchServiceConfig::with_max_result_window(
                max_result_window,
            ),
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{} must be a non-negative integer, got '{}'", key, raw))),
    }
}
