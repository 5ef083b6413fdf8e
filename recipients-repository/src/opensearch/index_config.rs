//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the recipients index.

use serde_json::{json, Value};

/// The base name of the recipients index (without version).
pub const INDEX_NAME: &str = "recipients";

/// Configuration for the recipients index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The alias name for the index (used for all operations).
    pub alias: String,
    /// The version number for the index (e.g., 0 for "recipients_v0").
    pub version: u32,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `alias` - The index alias name
    /// * `version` - The version number
    pub fn new(alias: impl Into<String>, version: u32) -> Self {
        Self {
            alias: alias.into(),
            version,
        }
    }

    /// The concrete index the alias points at.
    pub fn versioned_index_name(&self) -> String {
        get_versioned_index_name(Some(self.version))
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(INDEX_NAME, 0)
    }
}

/// Get the versioned index name.
///
/// # Arguments
///
/// * `version` - The version number (defaults to 0 if None)
///
/// # Returns
///
/// The versioned index name (e.g., "recipients_v0")
pub fn get_versioned_index_name(version: Option<u32>) -> String {
    let v = version.unwrap_or(0);
    format!("{}_v{}", INDEX_NAME, v)
}

/// Text field with a `keyword` sub-field, used for exact filters.
fn text_with_keyword() -> Value {
    json!({
        "type": "text",
        "fields": {
            "keyword": {
                "type": "keyword",
                "ignore_above": 256
            }
        }
    })
}

/// Get the index settings and mappings for the recipients index.
///
/// The configuration includes:
/// - **text + keyword**: `listId`, `status`, `email`, and the `name`/`surname`
///   metadata, so they can be matched, phrase-searched and filtered exactly
///   through `.keyword`
/// - **Keyword fields**: the remaining identifiers
/// - **Dynamic metadata**: other metadata keys are mapped on first write
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "userId": { "type": "keyword" },
                "listId": text_with_keyword(),
                "email": text_with_keyword(),
                "status": text_with_keyword(),
                "subscriptionOrigin": { "type": "keyword" },
                "isConfirmed": { "type": "boolean" },
                "riskScore": { "type": "float" },
                "unsubscribedCampaignId": { "type": "keyword" },
                "unsubscribedAt": { "type": "date", "format": "epoch_millis" },
                "subscribedAt": { "type": "date", "format": "epoch_millis" },
                "bouncedAt": { "type": "date", "format": "epoch_millis" },
                "complainedAt": { "type": "date", "format": "epoch_millis" },
                "createdAt": { "type": "date", "format": "epoch_millis" },
                "updatedAt": { "type": "date", "format": "epoch_millis" },
                "metadata": {
                    "type": "object",
                    "dynamic": true,
                    "properties": {
                        "name": text_with_keyword(),
                        "surname": text_with_keyword()
                    }
                },
                "systemMetadata": {
                    "type": "object",
                    "dynamic": true
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        // Exact filters go through the keyword sub-fields
        for field in ["listId", "status", "email"] {
            assert_eq!(properties[field]["type"], "text");
            assert_eq!(properties[field]["fields"]["keyword"]["type"], "keyword");
        }

        // Free-text fields
        assert_eq!(properties["metadata"]["properties"]["name"]["type"], "text");
        assert_eq!(properties["metadata"]["properties"]["surname"]["type"], "text");
    }

    #[test]
    fn test_versioned_index_name() {
        assert_eq!(get_versioned_index_name(None), "recipients_v0");
        assert_eq!(get_versioned_index_name(Some(3)), "recipients_v3");
        assert_eq!(IndexConfig::new("recipients", 2).versioned_index_name(), "recipients_v2");
    }

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.alias, "recipients");
        assert_eq!(config.version, 0);
    }
}
