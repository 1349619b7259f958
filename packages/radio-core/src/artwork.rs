//! Artwork references for the now-playing surface.
//!
//! Parsers never fetch images. Metadata usually carries a URL which the host
//! resolves asynchronously; hosts that already hold the image bytes pass them
//! directly.

use bytes::Bytes;
use serde_json::Value;

/// Artwork handed to the now-playing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artwork {
    /// An external URL the platform (or host) loads itself.
    Url(String),

    /// Raw encoded image bytes.
    Bytes(Bytes),
}

impl Artwork {
    /// Builds artwork from a metadata value.
    ///
    /// Non-empty strings become [`Artwork::Url`]; arrays of byte values become
    /// [`Artwork::Bytes`]. Anything else yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(url) if !url.trim().is_empty() => Some(Self::Url(url.trim().to_string())),
            Value::Array(items) if !items.is_empty() => {
                let bytes: Option<Vec<u8>> = items
                    .iter()
                    .map(|v| v.as_u64().and_then(|b| u8::try_from(b).ok()))
                    .collect();
                bytes.map(|b| Self::Bytes(Bytes::from(b)))
            }
            _ => None,
        }
    }

    /// Returns the URL if this is a `Url` variant.
    #[must_use]
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Artwork::Url(url) => Some(url),
            Artwork::Bytes(_) => None,
        }
    }

    /// Returns the bytes if this is a `Bytes` variant.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Artwork::Bytes(bytes) => Some(bytes),
            Artwork::Url(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_value_becomes_url() {
        let artwork = Artwork::from_value(&json!(" https://cdn.example.com/a.jpg ")).unwrap();
        assert_eq!(artwork.as_url(), Some("https://cdn.example.com/a.jpg"));
        assert!(artwork.as_bytes().is_none());
    }

    #[test]
    fn byte_array_becomes_bytes() {
        let artwork = Artwork::from_value(&json!([0xFF, 0xD8, 0xFF])).unwrap();
        assert_eq!(artwork.as_bytes().unwrap().as_ref(), &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn unusable_values_are_rejected() {
        assert!(Artwork::from_value(&json!("")).is_none());
        assert!(Artwork::from_value(&json!(42)).is_none());
        assert!(Artwork::from_value(&json!([1, 300])).is_none());
        assert!(Artwork::from_value(&json!(null)).is_none());
    }
}
