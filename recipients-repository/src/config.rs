//! Configuration types for the RecipientSearchService.

/// Default cap on `from + size`, matching the engine's default result window.
pub const DEFAULT_MAX_RESULT_WINDOW: usize = 10_000;

/// Configuration for the RecipientSearchService.
///
/// Page requests that reach past `max_result_window` are rejected before they are
/// sent, since the engine would refuse them anyway.
#[derive(Debug, Clone)]
pub struct RecipientSearchServiceConfig {
    /// Maximum value of `from + size` for a single search.
    ///
    /// Set to `None` to disable the check and leave enforcement to the engine.
    pub max_result_window: Option<usize>,
}

impl Default for RecipientSearchServiceConfig {
    fn default() -> Self {
        Self {
            max_result_window: Some(DEFAULT_MAX_RESULT_WINDOW),
        }
    }
}

impl RecipientSearchServiceConfig {
    /// Create a config without a result window check.
    pub fn unlimited() -> Self {
        Self {
            max_result_window: None,
        }
    }

    /// Create a config with a custom result window.
    ///
    /// # Arguments
    ///
    /// * `max_result_window` - Maximum value of `from + size` for a single search
    pub fn with_max_result_window(max_result_window: usize) -> Self {
        Self {
            max_result_window: Some(max_result_window),
        }
    }
}
