//! Separator-based reference parser.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::{MetadataParser, ParsedMetadata, ARTIST_KEY, TITLE_KEY};

/// Default separator between fields.
pub const DEFAULT_DELIMITER: &str = "|";

/// Default field roles, in order.
pub const DEFAULT_FIELDS: [&str; 3] = [TITLE_KEY, ARTIST_KEY, "extra"];

static SHARED: OnceLock<Arc<DelimitedParser>> = OnceLock::new();

/// Splits raw metadata on a fixed separator into ordered fields.
///
/// With the defaults, `"Song|Artist|http://img"` yields
/// `{"title": "Song", "artist": "Artist", "extra": "http://img"}`.
///
/// Fallback policy for malformed input:
/// - every configured field is always present in the output
/// - pieces are trimmed; missing pieces become `""`
/// - text beyond the last field stays in the last field, separators included
/// - input without any separator becomes the first field
#[derive(Debug, Clone)]
pub struct DelimitedParser {
    delimiter: String,
    fields: Vec<String>,
}

impl DelimitedParser {
    /// Creates a parser with a custom separator and field roles.
    ///
    /// An empty `delimiter` or `fields` list is replaced by the default so the
    /// parser can never fail at parse time. Use
    /// [`RadioConfig::validate`](crate::RadioConfig::validate) to reject such
    /// input up front.
    #[must_use]
    pub fn new(delimiter: impl Into<String>, fields: Vec<String>) -> Self {
        let delimiter = delimiter.into();
        let delimiter = if delimiter.is_empty() {
            DEFAULT_DELIMITER.to_string()
        } else {
            delimiter
        };
        let fields = if fields.is_empty() {
            DEFAULT_FIELDS.iter().map(ToString::to_string).collect()
        } else {
            fields
        };
        Self { delimiter, fields }
    }

    /// Returns the process-wide parser with default settings.
    pub fn shared() -> Arc<DelimitedParser> {
        SHARED.get_or_init(|| Arc::new(Self::default())).clone()
    }

    /// The separator between fields.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// The ordered field roles.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Default for DelimitedParser {
    fn default() -> Self {
        Self::new(
            DEFAULT_DELIMITER,
            DEFAULT_FIELDS.iter().map(ToString::to_string).collect(),
        )
    }
}

impl MetadataParser for DelimitedParser {
    fn name(&self) -> &'static str {
        "delimited"
    }

    fn parse(&self, raw: &str) -> ParsedMetadata {
        let mut pieces = raw.splitn(self.fields.len(), self.delimiter.as_str());
        let mut out = ParsedMetadata::new();
        for field in &self.fields {
            let value = pieces.next().map(str::trim).unwrap_or_default();
            out.insert(field.clone(), Value::String(value.to_string()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::field_str;

    #[test]
    fn splits_three_fields_in_order() {
        let parsed = DelimitedParser::default().parse("Song|Artist|http://img");
        assert_eq!(field_str(&parsed, "title"), Some("Song"));
        assert_eq!(field_str(&parsed, "artist"), Some("Artist"));
        assert_eq!(field_str(&parsed, "extra"), Some("http://img"));
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn missing_delimiter_puts_everything_in_first_field() {
        let parsed = DelimitedParser::default().parse("Just a station jingle");
        assert_eq!(field_str(&parsed, "title"), Some("Just a station jingle"));
        assert_eq!(field_str(&parsed, "artist"), Some(""));
        assert_eq!(field_str(&parsed, "extra"), Some(""));
    }

    #[test]
    fn short_input_fills_missing_fields_with_empty_strings() {
        let parsed = DelimitedParser::default().parse("Song | Artist");
        assert_eq!(field_str(&parsed, "title"), Some("Song"));
        assert_eq!(field_str(&parsed, "artist"), Some("Artist"));
        assert_eq!(field_str(&parsed, "extra"), Some(""));
    }

    #[test]
    fn surplus_pieces_stay_in_last_field() {
        let parsed = DelimitedParser::default().parse("Song|Artist|http://img?a=1|b=2");
        assert_eq!(field_str(&parsed, "extra"), Some("http://img?a=1|b=2"));
    }

    #[test]
    fn empty_input_yields_empty_fields() {
        let parsed = DelimitedParser::default().parse("");
        assert_eq!(field_str(&parsed, "title"), Some(""));
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn custom_delimiter_and_fields() {
        let parser = DelimitedParser::new(
            " / ",
            vec!["artist".to_string(), "title".to_string(), "duration".to_string()],
        );
        let parsed = parser.parse("Nina Simone / Sinnerman / 10:21");
        assert_eq!(field_str(&parsed, "artist"), Some("Nina Simone"));
        assert_eq!(field_str(&parsed, "title"), Some("Sinnerman"));
        assert_eq!(field_str(&parsed, "duration"), Some("10:21"));
    }

    #[test]
    fn parse_is_deterministic() {
        let parser = DelimitedParser::default();
        assert_eq!(parser.parse("a|b|c"), parser.parse("a|b|c"));
    }

    #[test]
    fn empty_settings_fall_back_to_defaults() {
        let parser = DelimitedParser::new("", Vec::new());
        assert_eq!(parser.delimiter(), "|");
        assert_eq!(parser.fields().len(), 3);
    }

    #[test]
    fn shared_returns_same_instance() {
        assert!(Arc::ptr_eq(&DelimitedParser::shared(), &DelimitedParser::shared()));
    }
}
