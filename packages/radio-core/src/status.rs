//! Coarse playback status reported by the manager.

use serde::{Deserialize, Serialize};

/// Playback status of a [`RadioManager`](crate::RadioManager).
///
/// Exactly one status holds at any instant. `Loading` covers connecting and
/// rebuffering; it is only entered through `play()` or engine-driven
/// rebuffering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackStatus {
    /// The stream is connecting or buffering.
    Loading,
    /// The stream is playing.
    Playing,
    /// The stream is paused (only reachable from `Playing`).
    Paused,
    /// The stream is stopped.
    #[default]
    Stopped,
}

impl PlaybackStatus {
    /// Returns true while the stream is loading or actually playing audio.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Loading | Self::Playing)
    }

    /// Returns the status as a short string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
