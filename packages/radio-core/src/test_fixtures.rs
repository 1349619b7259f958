//! Recording doubles shared by the unit tests.

use parking_lot::Mutex;

use crate::engine::{EngineSession, StreamEngine};
use crate::error::{EngineError, EngineResult, MediaError, MediaResult};
use crate::events::{RadioDelegate, RadioEvent};
use crate::media::{MediaSession, NowPlayingInfo};
use crate::metadata::ParsedMetadata;

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

/// A command received by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Start(String, u64),
    Resume(u64),
    Pause,
    Teardown,
}

/// Engine that records commands and lets the test drive its sessions.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    sessions: Mutex<Vec<EngineSession>>,
    start_error: Mutex<Option<EngineError>>,
    pause_error: Mutex<Option<EngineError>>,
}

impl RecordingEngine {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    /// The session handed over by the most recent `start` or `resume`.
    pub fn last_session(&self) -> EngineSession {
        self.sessions
            .lock()
            .last()
            .cloned()
            .expect("engine has not been started")
    }

    pub fn fail_start_with(&self, error: EngineError) {
        *self.start_error.lock() = Some(error);
    }

    pub fn fail_pause_with(&self, error: EngineError) {
        *self.pause_error.lock() = Some(error);
    }
}

impl StreamEngine for RecordingEngine {
    fn start(&self, endpoint: &str, session: EngineSession) -> EngineResult<()> {
        self.calls
            .lock()
            .push(EngineCall::Start(endpoint.to_string(), session.id()));
        if let Some(err) = self.start_error.lock().clone() {
            return Err(err);
        }
        self.sessions.lock().push(session);
        Ok(())
    }

    fn resume(&self, session: EngineSession) -> EngineResult<()> {
        self.calls.lock().push(EngineCall::Resume(session.id()));
        self.sessions.lock().push(session);
        Ok(())
    }

    fn pause(&self) -> EngineResult<()> {
        self.calls.lock().push(EngineCall::Pause);
        match self.pause_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn teardown(&self) {
        self.calls.lock().push(EngineCall::Teardown);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Delegate
// ─────────────────────────────────────────────────────────────────────────────

/// Delegate that records every callback as a [`RadioEvent`].
#[derive(Default)]
pub struct RecordingDelegate {
    events: Mutex<Vec<RadioEvent>>,
}

impl RecordingDelegate {
    pub fn events(&self) -> Vec<RadioEvent> {
        self.events.lock().clone()
    }

    /// Returns and clears the recorded events.
    pub fn take(&self) -> Vec<RadioEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    fn push(&self, event: RadioEvent) {
        self.events.lock().push(event);
    }
}

impl RadioDelegate for RecordingDelegate {
    fn on_loading(&self) {
        self.push(RadioEvent::Loading);
    }

    fn on_playing(&self) {
        self.push(RadioEvent::Playing);
    }

    fn on_paused(&self) {
        self.push(RadioEvent::Paused);
    }

    fn on_stopped(&self) {
        self.push(RadioEvent::Stopped);
    }

    fn on_metadata_updated(&self, metadata: &ParsedMetadata) {
        self.push(RadioEvent::MetadataUpdated {
            metadata: metadata.clone(),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Media Session
// ─────────────────────────────────────────────────────────────────────────────

/// A call received by [`RecordingMediaSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    NowPlaying(NowPlayingInfo),
    Clear,
    BackgroundAudio(bool),
    RemoteControls,
}

/// Media session that records calls, optionally failing audio-session changes.
#[derive(Default)]
pub struct RecordingMediaSession {
    calls: Mutex<Vec<MediaCall>>,
    error: Option<MediaError>,
}

impl RecordingMediaSession {
    pub fn failing(error: MediaError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            error: Some(error),
        }
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().clone()
    }

    fn result(&self) -> MediaResult<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl MediaSession for RecordingMediaSession {
    fn set_now_playing(&self, info: &NowPlayingInfo) {
        self.calls.lock().push(MediaCall::NowPlaying(info.clone()));
    }

    fn clear_now_playing(&self) {
        self.calls.lock().push(MediaCall::Clear);
    }

    fn set_background_audio(&self, enabled: bool) -> MediaResult<()> {
        self.calls.lock().push(MediaCall::BackgroundAudio(enabled));
        self.result()
    }

    fn begin_remote_control_events(&self) -> MediaResult<()> {
        self.calls.lock().push(MediaCall::RemoteControls);
        self.result()
    }
}
