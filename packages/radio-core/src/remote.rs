//! Platform-agnostic remote-control events.
//!
//! The host's platform layer translates hardware media keys and lock-screen
//! buttons into [`RemoteControlEvent`] before handing them to
//! [`RadioManager::process_remote_control_event`](crate::RadioManager::process_remote_control_event).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A media-key or lock-screen command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteControlEvent {
    Play,
    Pause,
    Stop,
    TogglePlayPause,
    TogglePlayStop,
    /// Any subtype the manager does not handle (next track, seek, ...).
    #[serde(other)]
    Unknown,
}

impl FromStr for RemoteControlEvent {
    type Err = std::convert::Infallible;

    /// Lenient parse: unrecognized names map to [`RemoteControlEvent::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Ok(match normalized.as_str() {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "stop" => Self::Stop,
            "toggle" | "toggle_play_pause" | "play_pause" => Self::TogglePlayPause,
            "toggle_play_stop" | "play_stop" => Self::TogglePlayStop,
            _ => Self::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> RemoteControlEvent {
        s.parse().unwrap()
    }

    #[test]
    fn parses_known_names_leniently() {
        assert_eq!(parse("play"), RemoteControlEvent::Play);
        assert_eq!(parse(" Pause "), RemoteControlEvent::Pause);
        assert_eq!(parse("toggle-play-pause"), RemoteControlEvent::TogglePlayPause);
        assert_eq!(parse("toggle"), RemoteControlEvent::TogglePlayPause);
        assert_eq!(parse("play stop"), RemoteControlEvent::TogglePlayStop);
    }

    #[test]
    fn unrecognized_names_are_unknown() {
        assert_eq!(parse("next_track"), RemoteControlEvent::Unknown);
        assert_eq!(parse(""), RemoteControlEvent::Unknown);
    }

    #[test]
    fn deserializes_unknown_subtypes() {
        let event: RemoteControlEvent = serde_json::from_str("\"seek_forward\"").unwrap();
        assert_eq!(event, RemoteControlEvent::Unknown);
        let event: RemoteControlEvent = serde_json::from_str("\"toggle_play_stop\"").unwrap();
        assert_eq!(event, RemoteControlEvent::TogglePlayStop);
    }
}
