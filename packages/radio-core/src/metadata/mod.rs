//! Pluggable metadata parsing.
//!
//! Radio streams periodically emit an unstructured text tag (usually the ICY
//! `StreamTitle`). A [`MetadataParser`] turns that raw text into a
//! [`ParsedMetadata`] mapping which the manager hands to its delegate.
//!
//! Every distinct metadata format gets its own parser type. Two reference
//! parsers ship with the crate:
//!
//! - [`DelimitedParser`]: `song|artist|extra` style tags split on a separator
//! - [`IcyTitleParser`]: Shoutcast `StreamTitle='Artist - Title';` tags
//!
//! Parsers do not resolve artwork. Callers that need an image read a URL from
//! one of the parsed fields and load it themselves.

mod delimited;
mod icy;
mod registry;

pub use delimited::{DelimitedParser, DEFAULT_DELIMITER, DEFAULT_FIELDS};
pub use icy::IcyTitleParser;
pub use registry::ParserRegistry;

use serde_json::{Map, Value};

/// Structured metadata: string keys mapped to arbitrary JSON values.
pub type ParsedMetadata = Map<String, Value>;

/// Key conventionally holding the track title.
pub const TITLE_KEY: &str = "title";
/// Key conventionally holding the artist name.
pub const ARTIST_KEY: &str = "artist";
/// Key conventionally holding an image reference (usually a URL).
pub const IMAGE_KEY: &str = "image";

/// Converts raw stream metadata into a structured mapping.
///
/// Implementations must be pure: no state shared across calls, no dependency
/// on earlier metadata, identical output for identical input. `parse` may run
/// on whatever thread the engine delivers metadata on.
pub trait MetadataParser: Send + Sync {
    /// Short identifier used for registry lookups and logging.
    fn name(&self) -> &'static str;

    /// Parses one raw metadata string.
    fn parse(&self, raw: &str) -> ParsedMetadata;
}

/// Returns the string stored under `key`, if any.
#[must_use]
pub fn field_str<'a>(metadata: &'a ParsedMetadata, key: &str) -> Option<&'a str> {
    metadata.get(key).and_then(Value::as_str)
}
