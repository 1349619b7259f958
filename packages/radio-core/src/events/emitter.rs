//! Delegate abstraction for observing a manager.
//!
//! Hosts (usually the UI layer) implement [`RadioDelegate`] and override only
//! the callbacks they care about. Callbacks run on whatever thread drove the
//! transition (a caller's thread or the engine's callback thread), so UI
//! implementations must hop to their own thread themselves.

use crate::metadata::ParsedMetadata;

/// Observer of playback status and metadata.
///
/// Every method has an empty default body; an unimplemented callback is not
/// an error.
///
/// # Example
///
/// ```ignore
/// struct NowPlayingLabel;
///
/// impl RadioDelegate for NowPlayingLabel {
///     fn on_metadata_updated(&self, metadata: &ParsedMetadata) {
///         println!("{:?}", metadata.get("title"));
///     }
/// }
/// ```
pub trait RadioDelegate: Send + Sync {
    /// The stream is connecting or rebuffering.
    fn on_loading(&self) {}

    /// The stream is playing.
    fn on_playing(&self) {}

    /// The stream is paused.
    fn on_paused(&self) {}

    /// The stream is stopped.
    fn on_stopped(&self) {}

    /// New metadata was parsed from the stream.
    fn on_metadata_updated(&self, _metadata: &ParsedMetadata) {}
}

/// Delegate that ignores every callback.
pub struct NoopDelegate;

impl RadioDelegate for NoopDelegate {}

/// Logs all callbacks at debug level.
pub struct LoggingDelegate;

impl RadioDelegate for LoggingDelegate {
    fn on_loading(&self) {
        tracing::debug!(status = "loading", "radio_status");
    }

    fn on_playing(&self) {
        tracing::debug!(status = "playing", "radio_status");
    }

    fn on_paused(&self) {
        tracing::debug!(status = "paused", "radio_status");
    }

    fn on_stopped(&self) {
        tracing::debug!(status = "stopped", "radio_status");
    }

    fn on_metadata_updated(&self, metadata: &ParsedMetadata) {
        tracing::debug!(?metadata, "radio_metadata");
    }
}
