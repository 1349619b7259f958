//! Radio Core - internet radio playback manager.
//!
//! This crate drives a single internet radio stream through a host-supplied
//! audio engine, reports coarse playback status to a delegate, parses raw
//! stream metadata with a pluggable parser, and mirrors now-playing info into
//! the host's media session.
//!
//! # Architecture
//!
//! - [`manager`]: The [`RadioManager`] status machine
//! - [`engine`]: Engine seam and a scripted [`SimulatedEngine`]
//! - [`metadata`]: Metadata parser trait, reference parsers and registry
//! - [`events`]: Delegate trait and event types
//! - [`media`]: Now-playing relay and background audio session
//! - [`remote`]: Remote-control events
//! - [`registry`]: Optional process-wide manager
//! - [`runtime`]: Task spawning abstraction
//! - [`error`]: Centralized error types
//!
//! # Abstraction Traits
//!
//! Everything platform-specific sits behind a trait:
//!
//! - [`StreamEngine`](engine::StreamEngine): Connecting, buffering and decoding
//! - [`MediaSession`](media::MediaSession): Now-playing display and audio session
//! - [`MetadataParser`](metadata::MetadataParser): Raw metadata formats
//! - [`RadioDelegate`](events::RadioDelegate): Status and metadata callbacks
//! - [`TaskSpawner`](runtime::TaskSpawner): Spawning background tasks
//!
//! # Example
//!
//! ```ignore
//! let engine = Arc::new(SimulatedEngine::new(TokioSpawner::current(), Default::default()));
//! let manager = RadioManager::with_stream_endpoint(engine, "http://radio.example.com/live");
//! manager.set_metadata_parser(IcyTitleParser::shared());
//! manager.set_delegate(&delegate);
//! manager.play();
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod artwork;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod manager;
pub mod media;
pub mod metadata;
pub mod registry;
pub mod remote;
pub mod runtime;
pub mod status;

#[cfg(test)]
mod test_fixtures;

pub use artwork::Artwork;
pub use config::RadioConfig;
pub use engine::{EngineEvent, EngineSession, SimulatedEngine, SimulatedEngineConfig, StreamEngine};
pub use error::{EngineError, EngineResult, ErrorCode, MediaError, MediaResult, RadioError, RadioResult};
pub use events::{BroadcastDelegate, LoggingDelegate, NoopDelegate, RadioDelegate, RadioEvent};
pub use manager::RadioManager;
pub use media::{LoggingMediaSession, MediaCenter, MediaSession, NoopMediaSession, NowPlayingInfo};
pub use metadata::{DelimitedParser, IcyTitleParser, MetadataParser, ParsedMetadata, ParserRegistry};
pub use registry::ManagerRegistry;
pub use remote::RemoteControlEvent;
pub use runtime::{TaskSpawner, TokioSpawner};
pub use status::PlaybackStatus;
