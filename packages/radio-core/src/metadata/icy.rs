//! Shoutcast/Icecast `StreamTitle` parser.
//!
//! ICY servers send metadata blocks such as
//! `StreamTitle='Artist - Title';StreamUrl='http://...';`. Some players strip
//! the framing and hand over only the bare `Artist - Title` text; both forms
//! are accepted.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::{MetadataParser, ParsedMetadata, ARTIST_KEY, TITLE_KEY};

/// Separator between artist and title inside `StreamTitle`.
const ARTIST_TITLE_SEPARATOR: &str = " - ";

/// Key for the `StreamUrl` value when the server sends one.
pub const URL_KEY: &str = "url";

static SHARED: OnceLock<Arc<IcyTitleParser>> = OnceLock::new();

/// Parses ICY `StreamTitle` metadata into `title`, `artist` and optional `url`.
///
/// The artist/title split happens on the first `" - "`. Without a separator
/// the whole text becomes the title and the artist is `""`. Servers that swap
/// apostrophes for U+2019 to survive ICY quoting get them mapped back.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcyTitleParser;

impl IcyTitleParser {
    /// Returns the process-wide parser instance.
    pub fn shared() -> Arc<IcyTitleParser> {
        SHARED.get_or_init(|| Arc::new(Self)).clone()
    }
}

/// Extracts the value of `key='...'` from an ICY metadata block.
fn extract_field<'a>(raw: &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("{key}='");
    let start = raw.find(&marker)? + marker.len();
    let rest = &raw[start..];
    let end = rest
        .find("';")
        .or_else(|| rest.rfind('\''))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

impl MetadataParser for IcyTitleParser {
    fn name(&self) -> &'static str {
        "icy"
    }

    fn parse(&self, raw: &str) -> ParsedMetadata {
        let stream_title = extract_field(raw, "StreamTitle").unwrap_or(raw);
        let stream_title = stream_title.trim().replace('\u{2019}', "'");

        let (artist, title) = match stream_title.split_once(ARTIST_TITLE_SEPARATOR) {
            Some((artist, title)) => (artist.trim(), title.trim()),
            None => ("", stream_title.as_str()),
        };

        let mut out = ParsedMetadata::new();
        out.insert(TITLE_KEY.to_string(), Value::String(title.to_string()));
        out.insert(ARTIST_KEY.to_string(), Value::String(artist.to_string()));

        if let Some(url) = extract_field(raw, "StreamUrl").map(str::trim) {
            if !url.is_empty() {
                out.insert(URL_KEY.to_string(), Value::String(url.to_string()));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::field_str;

    #[test]
    fn parses_framed_stream_title() {
        let parsed = IcyTitleParser.parse("StreamTitle='Daft Punk - Around the World';");
        assert_eq!(field_str(&parsed, "artist"), Some("Daft Punk"));
        assert_eq!(field_str(&parsed, "title"), Some("Around the World"));
        assert!(parsed.get("url").is_none());
    }

    #[test]
    fn parses_bare_title() {
        let parsed = IcyTitleParser.parse("Massive Attack - Teardrop");
        assert_eq!(field_str(&parsed, "artist"), Some("Massive Attack"));
        assert_eq!(field_str(&parsed, "title"), Some("Teardrop"));
    }

    #[test]
    fn splits_on_first_separator_only() {
        let parsed = IcyTitleParser.parse("StreamTitle='Artist - Song - Live Edit';");
        assert_eq!(field_str(&parsed, "artist"), Some("Artist"));
        assert_eq!(field_str(&parsed, "title"), Some("Song - Live Edit"));
    }

    #[test]
    fn no_separator_becomes_title() {
        let parsed = IcyTitleParser.parse("StreamTitle='Station ID';");
        assert_eq!(field_str(&parsed, "title"), Some("Station ID"));
        assert_eq!(field_str(&parsed, "artist"), Some(""));
    }

    #[test]
    fn extracts_stream_url() {
        let parsed = IcyTitleParser
            .parse("StreamTitle='A - B';StreamUrl='http://example.com/cover.jpg';");
        assert_eq!(field_str(&parsed, "url"), Some("http://example.com/cover.jpg"));
    }

    #[test]
    fn restores_apostrophes() {
        let parsed = IcyTitleParser.parse("StreamTitle='Guns N\u{2019} Roses - It\u{2019}s So Easy';");
        assert_eq!(field_str(&parsed, "artist"), Some("Guns N' Roses"));
        assert_eq!(field_str(&parsed, "title"), Some("It's So Easy"));
    }

    #[test]
    fn empty_stream_title_yields_empty_fields() {
        let parsed = IcyTitleParser.parse("StreamTitle='';");
        assert_eq!(field_str(&parsed, "title"), Some(""));
        assert_eq!(field_str(&parsed, "artist"), Some(""));
    }
}
