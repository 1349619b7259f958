//! Delegate callbacks and event types.
//!
//! This module provides:
//! - [`RadioDelegate`] trait with independently optional callbacks
//! - [`RadioEvent`] tagged type covering the same notifications
//! - [`BroadcastDelegate`] for fanning events out over a tokio channel
//!
//! The manager holds its delegate weakly; an implementation that is dropped
//! simply stops receiving callbacks.

mod bridge;
mod emitter;

pub use bridge::BroadcastDelegate;
pub use emitter::{LoggingDelegate, NoopDelegate, RadioDelegate};

use serde::Serialize;

use crate::metadata::ParsedMetadata;
use crate::status::PlaybackStatus;

/// Notifications delivered to a [`RadioDelegate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RadioEvent {
    /// Status became `Loading`.
    Loading,
    /// Status became `Playing`.
    Playing,
    /// Status became `Paused`.
    Paused,
    /// Status became `Stopped`.
    Stopped,
    /// A metadata update was parsed.
    MetadataUpdated {
        /// Parser output for the update.
        metadata: ParsedMetadata,
    },
}

impl RadioEvent {
    /// Returns the status-transition event for `status`.
    #[must_use]
    pub fn for_status(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Loading => Self::Loading,
            PlaybackStatus::Playing => Self::Playing,
            PlaybackStatus::Paused => Self::Paused,
            PlaybackStatus::Stopped => Self::Stopped,
        }
    }

    /// Invokes the matching callback on `delegate`.
    pub fn dispatch(&self, delegate: &dyn RadioDelegate) {
        match self {
            Self::Loading => delegate.on_loading(),
            Self::Playing => delegate.on_playing(),
            Self::Paused => delegate.on_paused(),
            Self::Stopped => delegate.on_stopped(),
            Self::MetadataUpdated { metadata } => delegate.on_metadata_updated(metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_events_serialize_with_type_tag() {
        let json = serde_json::to_value(RadioEvent::Playing).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "playing" }));
    }

    #[test]
    fn metadata_event_serializes_mapping() {
        let mut metadata = ParsedMetadata::new();
        metadata.insert("title".into(), "Song".into());
        let json = serde_json::to_value(RadioEvent::MetadataUpdated { metadata }).unwrap();
        assert_eq!(json["type"], "metadataUpdated");
        assert_eq!(json["metadata"]["title"], "Song");
    }

    #[test]
    fn for_status_maps_every_status() {
        assert_eq!(RadioEvent::for_status(PlaybackStatus::Loading), RadioEvent::Loading);
        assert_eq!(RadioEvent::for_status(PlaybackStatus::Playing), RadioEvent::Playing);
        assert_eq!(RadioEvent::for_status(PlaybackStatus::Paused), RadioEvent::Paused);
        assert_eq!(RadioEvent::for_status(PlaybackStatus::Stopped), RadioEvent::Stopped);
    }
}
