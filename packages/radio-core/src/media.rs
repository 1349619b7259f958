//! Now-playing and background audio relay.
//!
//! The OS owns the lock-screen/control-center display, the background-capable
//! audio session and remote-control delivery. [`MediaSession`] is the seam a
//! host implements on top of those platform services; [`MediaCenter`] is the
//! stateless relay the manager and host code call into.
//!
//! # Setup
//!
//! Hosts call [`MediaCenter::enable_audio_session`] once at startup. Without
//! it, remote-control events never arrive; the manager cannot detect that.

use std::sync::Arc;

use serde_json::Value;

use crate::artwork::Artwork;
use crate::error::MediaResult;
use crate::metadata::{field_str, ParsedMetadata, ARTIST_KEY, IMAGE_KEY, TITLE_KEY};

/// Track info pushed to the now-playing surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlayingInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub artwork: Option<Artwork>,
}

impl NowPlayingInfo {
    /// Creates info from the three positional values.
    #[must_use]
    pub fn new(
        title: impl Into<Option<String>>,
        artist: impl Into<Option<String>>,
        artwork: Option<Artwork>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            artwork,
        }
    }

    /// Builds info from positional arguments in the order title, artist, image.
    ///
    /// Missing or non-string title/artist entries become `None`; the image
    /// follows [`Artwork::from_value`].
    #[must_use]
    pub fn from_arguments(arguments: &[Value]) -> Self {
        let text = |idx: usize| {
            arguments
                .get(idx)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };
        Self {
            title: text(0),
            artist: text(1),
            artwork: arguments.get(2).and_then(Artwork::from_value),
        }
    }

    /// Builds info from a keyed mapping (`title`, `artist`, `image`).
    #[must_use]
    pub fn from_mapping(metadata: &ParsedMetadata) -> Self {
        Self {
            title: field_str(metadata, TITLE_KEY).map(ToString::to_string),
            artist: field_str(metadata, ARTIST_KEY).map(ToString::to_string),
            artwork: metadata.get(IMAGE_KEY).and_then(Artwork::from_value),
        }
    }

    /// Returns true when there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.artwork.is_none()
    }
}

/// Platform media-session services.
///
/// Implemented by the host on top of its OS APIs (MPNowPlayingInfoCenter,
/// MPRIS, SMTC, ...). Calls must not block.
pub trait MediaSession: Send + Sync {
    /// Replaces the displayed now-playing info.
    fn set_now_playing(&self, info: &NowPlayingInfo);

    /// Removes all now-playing info.
    fn clear_now_playing(&self);

    /// Switches the background-capable audio session category on or off.
    fn set_background_audio(&self, enabled: bool) -> MediaResult<()>;

    /// Starts delivery of hardware/lock-screen remote-control events.
    fn begin_remote_control_events(&self) -> MediaResult<()>;
}

/// Stateless relay to a [`MediaSession`].
#[derive(Clone)]
pub struct MediaCenter {
    session: Arc<dyn MediaSession>,
}

impl MediaCenter {
    /// Creates a relay over the given platform session.
    #[must_use]
    pub fn new(session: Arc<dyn MediaSession>) -> Self {
        Self { session }
    }

    /// Pushes title, artist and artwork to the now-playing surface.
    pub fn send_media_info(
        &self,
        title: Option<String>,
        artist: Option<String>,
        artwork: Option<Artwork>,
    ) {
        self.send_info(&NowPlayingInfo::new(title, artist, artwork));
    }

    /// Pushes positional `[title, artist, image]` values.
    pub fn send_media_info_with_arguments(&self, arguments: &[Value]) {
        self.send_info(&NowPlayingInfo::from_arguments(arguments));
    }

    /// Pushes a keyed mapping (`title`, `artist`, `image`).
    pub fn send_media_info_with_mapping(&self, metadata: &ParsedMetadata) {
        self.send_info(&NowPlayingInfo::from_mapping(metadata));
    }

    /// Pushes prepared info.
    pub fn send_info(&self, info: &NowPlayingInfo) {
        log::debug!(
            "[MediaCenter] Now playing: title={:?}, artist={:?}, artwork={}",
            info.title,
            info.artist,
            info.artwork.is_some()
        );
        self.session.set_now_playing(info);
    }

    /// Clears all now-playing info.
    pub fn clear_media_info(&self) {
        log::debug!("[MediaCenter] Clearing now playing info");
        self.session.clear_now_playing();
    }

    /// Enables background audio and begins remote-control delivery.
    ///
    /// Call once during application startup.
    pub fn enable_audio_session(&self) -> MediaResult<()> {
        self.session.set_background_audio(true)?;
        self.session.begin_remote_control_events()?;
        log::info!("[MediaCenter] Background audio session enabled");
        Ok(())
    }

    /// Disables background audio.
    ///
    /// Rarely needed: the platform tears the session down on process exit.
    /// Calling this while a stream is still playing leaves the outcome to
    /// the platform.
    pub fn disable_audio_session(&self) -> MediaResult<()> {
        self.session.set_background_audio(false)?;
        log::info!("[MediaCenter] Background audio session disabled");
        Ok(())
    }
}

/// Media session that discards everything.
///
/// For headless hosts without a now-playing surface.
pub struct NoopMediaSession;

impl MediaSession for NoopMediaSession {
    fn set_now_playing(&self, _info: &NowPlayingInfo) {}

    fn clear_now_playing(&self) {}

    fn set_background_audio(&self, _enabled: bool) -> MediaResult<()> {
        Ok(())
    }

    fn begin_remote_control_events(&self) -> MediaResult<()> {
        Ok(())
    }
}

/// Media session that logs every call at info level.
pub struct LoggingMediaSession;

impl MediaSession for LoggingMediaSession {
    fn set_now_playing(&self, info: &NowPlayingInfo) {
        log::info!(
            "[NowPlaying] {} - {}",
            info.artist.as_deref().unwrap_or("?"),
            info.title.as_deref().unwrap_or("?")
        );
    }

    fn clear_now_playing(&self) {
        log::info!("[NowPlaying] cleared");
    }

    fn set_background_audio(&self, enabled: bool) -> MediaResult<()> {
        log::info!("[NowPlaying] background audio enabled={}", enabled);
        Ok(())
    }

    fn begin_remote_control_events(&self) -> MediaResult<()> {
        log::info!("[NowPlaying] remote controls enabled");
        Ok(())
    }
}
