//! Centralized error types for the radio core library.
//!
//! Playback operations on [`RadioManager`](crate::RadioManager) never return
//! errors: engine failures degrade to `Stopped` and missing collaborators turn
//! into silent no-ops. The types here cover the places where a caller can act
//! on a failure: building a manager from configuration, the process-wide
//! registry lifecycle, and the engine/media-session seams.

use serde::Serialize;
use thiserror::Error;

/// Trait for error types that provide machine-readable error codes.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors reported by a [`StreamEngine`](crate::engine::StreamEngine) when a
/// command cannot be issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The endpoint could not be handed to the engine (malformed, unsupported scheme).
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The engine refused the command in its current state.
    #[error("Engine rejected command: {0}")]
    Rejected(String),

    /// The underlying platform engine is unavailable.
    #[error("Engine unavailable: {0}")]
    Unavailable(String),
}

impl ErrorCode for EngineError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidEndpoint(_) => "invalid_endpoint",
            Self::Rejected(_) => "engine_rejected",
            Self::Unavailable(_) => "engine_unavailable",
        }
    }
}

/// Result alias for engine commands.
pub type EngineResult<T> = Result<T, EngineError>;

// ─────────────────────────────────────────────────────────────────────────────
// Media Session Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors reported by a [`MediaSession`](crate::media::MediaSession).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The audio session category could not be changed.
    #[error("Audio session error: {0}")]
    AudioSession(String),

    /// Remote-control event delivery could not be enabled.
    #[error("Remote control registration failed: {0}")]
    RemoteControls(String),
}

impl ErrorCode for MediaError {
    fn code(&self) -> &'static str {
        match self {
            Self::AudioSession(_) => "audio_session_failed",
            Self::RemoteControls(_) => "remote_controls_failed",
        }
    }
}

/// Result alias for media-session calls.
pub type MediaResult<T> = Result<T, MediaError>;

// ─────────────────────────────────────────────────────────────────────────────
// Crate Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Crate-wide error type.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum RadioError {
    /// Configuration values failed validation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A parser name was not found in the [`ParserRegistry`](crate::metadata::ParserRegistry).
    #[error("Unknown metadata parser: {0}")]
    UnknownParser(String),

    /// The registry already holds a shared manager.
    #[error("Shared manager already installed")]
    AlreadyInstalled,

    /// The registry has no shared manager yet.
    #[error("Shared manager not installed")]
    NotInstalled,
}

impl ErrorCode for RadioError {
    fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::UnknownParser(_) => "unknown_parser",
            Self::AlreadyInstalled => "already_installed",
            Self::NotInstalled => "not_installed",
        }
    }
}

/// Convenient Result alias for crate-wide operations.
pub type RadioResult<T> = Result<T, RadioError>;
