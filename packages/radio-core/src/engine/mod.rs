//! Streaming engine seam.
//!
//! The engine that actually connects, buffers and decodes the stream belongs
//! to the host platform. The manager drives it through [`StreamEngine`] and
//! hears back through the [`EngineSession`] handed over on every play attempt.
//!
//! # Sessions
//!
//! Each `start` gets a fresh session. Stopping or switching streams makes the
//! previous session stale, and events reported through a stale session are
//! dropped. An engine therefore never has to cancel in-flight work to keep
//! the manager consistent; it may simply keep reporting and be ignored.
//!
//! # Command order
//!
//! Commands for one manager never overlap: each is issued under the manager's
//! command lock, in the order its status changed. A `teardown` always follows
//! the `start` or `resume` it undoes. Commands may be issued from any thread,
//! and an engine may report through a session from inside a command.

mod simulated;

pub use simulated::{SimulatedEngine, SimulatedEngineConfig};

use std::sync::Weak;

use crate::error::EngineResult;
use crate::manager::{ManagerCore, RadioManager};

/// Commands the manager issues to the platform engine.
///
/// Every method returns immediately; progress is reported asynchronously
/// through the [`EngineSession`].
pub trait StreamEngine: Send + Sync {
    /// Begins connecting to `endpoint` for a new session.
    fn start(&self, endpoint: &str, session: EngineSession) -> EngineResult<()>;

    /// Resumes a paused session. The engine reports [`EngineSession::ready`]
    /// once audio flows again.
    fn resume(&self, session: EngineSession) -> EngineResult<()>;

    /// Suspends playback without releasing the connection.
    fn pause(&self) -> EngineResult<()>;

    /// Releases the connection and any buffered audio. Must be idempotent.
    fn teardown(&self);
}

/// Notifications an engine reports for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Enough audio is buffered; playback is audible.
    Ready,
    /// Playback stalled and the engine is rebuffering.
    Buffering,
    /// A raw metadata tag arrived from the stream.
    Metadata(String),
    /// The connection or decoder failed.
    Failed(String),
    /// The server closed the stream.
    Ended,
}

/// Handle through which an engine reports progress for one play attempt.
///
/// Holds the manager weakly: reports after the manager is dropped go nowhere.
#[derive(Debug, Clone)]
pub struct EngineSession {
    id: u64,
    manager: Weak<ManagerCore>,
}

impl EngineSession {
    pub(crate) fn new(id: u64, manager: Weak<ManagerCore>) -> Self {
        Self { id, manager }
    }

    /// Monotonic session identifier (unique per manager).
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns true while the manager still considers this session current.
    ///
    /// Engines can poll this to stop work for an abandoned attempt early.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.manager
            .upgrade()
            .is_some_and(|core| RadioManager::from_core(core).current_session() == Some(self.id))
    }

    /// Reports an event for this session.
    pub fn emit(&self, event: EngineEvent) {
        match self.manager.upgrade() {
            Some(core) => RadioManager::from_core(core).handle_engine_event(self.id, event),
            None => log::trace!("[EngineSession] Manager gone, dropping {:?}", event),
        }
    }

    /// Reports that audio is playing.
    pub fn ready(&self) {
        self.emit(EngineEvent::Ready);
    }

    /// Reports that playback stalled and is rebuffering.
    pub fn buffering(&self) {
        self.emit(EngineEvent::Buffering);
    }

    /// Reports a raw metadata tag.
    pub fn metadata(&self, raw: impl Into<String>) {
        self.emit(EngineEvent::Metadata(raw.into()));
    }

    /// Reports a connection or decode failure.
    pub fn failed(&self, reason: impl Into<String>) {
        self.emit(EngineEvent::Failed(reason.into()));
    }

    /// Reports that the server closed the stream.
    pub fn ended(&self) {
        self.emit(EngineEvent::Ended);
    }
}
