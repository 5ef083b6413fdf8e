//! Dependency initialization and wiring for the recipients search binary.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use super::settings::{ConnectionMode, Settings};
use crate::AppError;
use recipients_repository::opensearch::IndexConfig;
use recipients_repository::{OpenSearchProvider, RecipientSearchService, SearchIndexProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The service commands run against.
    pub service: RecipientSearchService,
}

impl Dependencies {
    /// Connect to OpenSearch, make sure the index and alias exist and build the
    /// service.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If initialization fails (in retry mode, only index
    ///   creation can fail)
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            alias = %settings.index_config.alias,
            version = settings.index_config.version,
            connection_mode = ?settings.connection_mode,
            retry_interval_secs = settings.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let provider = Self::connect_to_opensearch(
            &settings.opensearch_url,
            settings.index_config.clone(),
            settings.connection_mode,
            settings.retry_interval,
        )
        .await?;

        info!("OpenSearch connection established");

        Ok(Self {
            service: RecipientSearchService::with_config(
                Box::new(provider),
                settings.service_config.clone(),
            ),
        })
    }

    /// Connect to OpenSearch with retry logic based on connection mode.
    async fn connect_to_opensearch(
        url: &str,
        index_config: IndexConfig,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearchProvider, AppError> {
        loop {
            match Self::try_connect_opensearch(url, index_config.clone()).await {
                Ok(provider) => return Ok(provider),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(AppError::config(format!(
                            "Failed to connect to OpenSearch: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            opensearch_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to OpenSearch, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }

    /// Build the provider and make sure the index behind its alias exists.
    ///
    /// An unreachable engine only shows up on the first request, so the index
    /// check doubles as the connection check.
    async fn try_connect_opensearch(
        url: &str,
        index_config: IndexConfig,
    ) -> Result<OpenSearchProvider, AppError> {
        let provider = OpenSearchProvider::new(url, index_config).await.map_err(|e| {
            AppError::config(format!("Failed to create OpenSearch provider: {}", e))
        })?;

        provider
            .ensure_index_exists()
            .await
            .map_err(|e| AppError::config(format!("Failed to ensure index exists: {}", e)))?;

        Ok(provider)
    }
}
