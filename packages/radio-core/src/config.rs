//! Manager configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RadioError, RadioResult};
use crate::metadata::{DEFAULT_DELIMITER, DEFAULT_FIELDS};

/// Settings used by [`RadioManager::from_config`](crate::RadioManager::from_config).
///
/// All fields have defaults; an empty document yields a manager without an
/// endpoint or parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadioConfig {
    /// Stream endpoint to play.
    pub stream_url: Option<String>,
    /// Treat `pause()` as `stop()`.
    pub pause_stops_playing: bool,
    /// Registered parser name (`delimited`, `icy`, or a custom registration).
    /// `None` drops metadata updates.
    pub parser: Option<String>,
    /// Separator for the `delimited` parser.
    pub delimiter: String,
    /// Field names for the `delimited` parser.
    pub fields: Vec<String>,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            stream_url: None,
            pause_stops_playing: false,
            parser: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            fields: DEFAULT_FIELDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl RadioConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`RadioError::Configuration`] for a blank endpoint, an empty
    /// delimiter, or an empty or blank field list.
    pub fn validate(&self) -> RadioResult<()> {
        if let Some(url) = &self.stream_url {
            if url.trim().is_empty() {
                return Err(RadioError::Configuration(
                    "stream_url must not be blank".to_string(),
                ));
            }
        }
        if self.delimiter.is_empty() {
            return Err(RadioError::Configuration(
                "delimiter must not be empty".to_string(),
            ));
        }
        if self.fields.is_empty() {
            return Err(RadioError::Configuration(
                "fields must name at least one key".to_string(),
            ));
        }
        if self.fields.iter().any(|f| f.trim().is_empty()) {
            return Err(RadioError::Configuration(
                "fields must not contain blank names".to_string(),
            ));
        }
        Ok(())
    }

    /// True when `delimiter` and `fields` match the built-in `delimited` parser.
    #[must_use]
    pub fn uses_default_delimited_layout(&self) -> bool {
        self.delimiter == DEFAULT_DELIMITER
            && self.fields.iter().map(String::as_str).eq(DEFAULT_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RadioConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.uses_default_delimited_layout());
        assert!(config.parser.is_none());
    }

    #[test]
    fn blank_endpoint_is_rejected() {
        let config = RadioConfig {
            stream_url: Some("  ".to_string()),
            ..RadioConfig::default()
        };
        assert!(matches!(config.validate(), Err(RadioError::Configuration(_))));
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let config = RadioConfig {
            delimiter: String::new(),
            ..RadioConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_or_blank_fields_are_rejected() {
        let empty = RadioConfig {
            fields: vec![],
            ..RadioConfig::default()
        };
        let blank = RadioConfig {
            fields: vec!["title".to_string(), " ".to_string()],
            ..RadioConfig::default()
        };
        assert!(empty.validate().is_err());
        assert!(blank.validate().is_err());
    }

    #[test]
    fn deserializes_partial_document_with_defaults() {
        let config: RadioConfig =
            serde_json::from_str(r#"{"streamUrl":"http://x/live","parser":"icy"}"#).unwrap();
        assert_eq!(config.stream_url.as_deref(), Some("http://x/live"));
        assert_eq!(config.parser.as_deref(), Some("icy"));
        assert_eq!(config.delimiter, "|");
        assert!(!config.pause_stops_playing);
    }

    #[test]
    fn custom_layout_is_detected() {
        let config = RadioConfig {
            delimiter: " / ".to_string(),
            ..RadioConfig::default()
        };
        assert!(!config.uses_default_delimited_layout());
    }
}
