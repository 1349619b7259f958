//! Playback manager.
//!
//! [`RadioManager`] owns one stream endpoint, one [`PlaybackStatus`] and one
//! delegate reference. It turns play/pause/stop requests into
//! [`StreamEngine`] commands, turns engine reports back into status
//! transitions, runs the bound [`MetadataParser`] on raw metadata, and relays
//! the result to the delegate and the now-playing surface.
//!
//! # Status machine
//!
//! ```text
//!            play()                 engine ready
//!  Stopped ──────────▶ Loading ◀────────────────▶ Playing
//!     ▲                   │      engine buffering     │
//!     │   stop() / engine failure / pause() while     │ pause()
//!     └──────────── loading / pause-stops-playing ────┤
//!                                                     ▼
//!              Loading ◀──────── play() ──────────  Paused
//! ```
//!
//! # Ordering
//!
//! Every operation holds a per-manager command lock while it changes status
//! and issues the matching engine command, so the engine sees commands in the
//! same order the status changed. Delegate callbacks run after both locks are
//! released; a delegate may call back into the manager.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};
use uuid::Uuid;

use crate::config::RadioConfig;
use crate::engine::{EngineEvent, EngineSession, StreamEngine};
use crate::error::RadioResult;
use crate::events::{RadioDelegate, RadioEvent};
use crate::media::MediaCenter;
use crate::metadata::{DelimitedParser, MetadataParser, ParserRegistry};
use crate::remote::RemoteControlEvent;
use crate::status::PlaybackStatus;

/// Mutable manager state, guarded by [`ManagerCore::state`].
struct ManagerState {
    endpoint: Option<String>,
    status: PlaybackStatus,
    pause_stops_playing: bool,
    parser: Option<Arc<dyn MetadataParser>>,
    delegate: Option<Weak<dyn RadioDelegate>>,
    media: Option<MediaCenter>,
    /// Session the engine is working on. `None` while stopped.
    session: Option<u64>,
    /// Last issued session id.
    session_counter: u64,
}

impl ManagerState {
    fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            status: PlaybackStatus::Stopped,
            pause_stops_playing: false,
            parser: None,
            delegate: None,
            media: None,
            session: None,
            session_counter: 0,
        }
    }

    /// Moves to `status`, returning the notification to deliver once the
    /// lock is released. Returns `None` when the status does not change.
    fn transition(&mut self, status: PlaybackStatus) -> Option<Transition> {
        if self.status == status {
            return None;
        }
        log::debug!("[RadioManager] Status {} -> {}", self.status, status);
        self.status = status;
        Some(Transition {
            status,
            delegate: self.delegate.clone(),
            media: self.media.clone(),
        })
    }

    fn begin_session(&mut self) -> u64 {
        self.session_counter += 1;
        self.session = Some(self.session_counter);
        self.session_counter
    }

    fn is_current(&self, session: u64) -> bool {
        self.session == Some(session)
    }
}

/// A status change captured under the lock.
struct Transition {
    status: PlaybackStatus,
    delegate: Option<Weak<dyn RadioDelegate>>,
    media: Option<MediaCenter>,
}

impl Transition {
    fn deliver(self) {
        if self.status == PlaybackStatus::Stopped {
            if let Some(media) = &self.media {
                media.clear_media_info();
            }
        }
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            RadioEvent::for_status(self.status).dispatch(delegate.as_ref());
        }
    }
}

fn deliver(transition: Option<Transition>) {
    if let Some(transition) = transition {
        transition.deliver();
    }
}

fn deliver_all(pending: Vec<Transition>) {
    for transition in pending {
        transition.deliver();
    }
}

/// Shared part of a manager, referenced weakly by engine sessions.
pub(crate) struct ManagerCore {
    id: Uuid,
    engine: Arc<dyn StreamEngine>,
    state: Mutex<ManagerState>,
    /// Held from a status change until its engine command returns.
    /// Reentrant so an engine that reports from inside a command cannot
    /// deadlock a delegate that calls back in.
    commands: ReentrantMutex<()>,
}

/// Internet radio playback manager.
///
/// Cloning is cheap and yields another handle to the same manager. Use
/// [`RadioManager::new`] for independent instances, or
/// [`ManagerRegistry`](crate::registry::ManagerRegistry) for a process-wide
/// one.
#[derive(Clone)]
pub struct RadioManager {
    core: Arc<ManagerCore>,
}

impl std::fmt::Debug for RadioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.core.state.lock();
        f.debug_struct("RadioManager")
            .field("id", &self.core.id)
            .field("endpoint", &state.endpoint)
            .field("status", &state.status)
            .finish()
    }
}

impl RadioManager {
    /// Creates an independent manager without an endpoint.
    #[must_use]
    pub fn new(engine: Arc<dyn StreamEngine>) -> Self {
        Self::build(engine, None)
    }

    /// Creates an independent manager for `endpoint`. Does not start playback.
    #[must_use]
    pub fn with_stream_endpoint(engine: Arc<dyn StreamEngine>, endpoint: impl Into<String>) -> Self {
        Self::build(engine, Some(endpoint.into()))
    }

    /// Creates a manager from validated configuration.
    ///
    /// The parser is resolved by name from `parsers`; the `delimited` parser
    /// is instantiated with the configured separator and fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or names an unknown
    /// parser.
    pub fn from_config(
        engine: Arc<dyn StreamEngine>,
        config: &RadioConfig,
        parsers: &ParserRegistry,
    ) -> RadioResult<Self> {
        config.validate()?;

        let parser: Option<Arc<dyn MetadataParser>> = match config.parser.as_deref() {
            None => None,
            Some("delimited") if !config.uses_default_delimited_layout() => Some(Arc::new(
                DelimitedParser::new(config.delimiter.clone(), config.fields.clone()),
            )),
            Some(name) => Some(parsers.resolve(name)?),
        };

        let manager = Self::build(engine, config.stream_url.clone());
        {
            let mut state = manager.core.state.lock();
            state.pause_stops_playing = config.pause_stops_playing;
            state.parser = parser;
        }
        log::info!(
            "[RadioManager] Created {} from config: endpoint={:?}, parser={:?}, pause_stops_playing={}",
            manager.core.id,
            config.stream_url,
            config.parser,
            config.pause_stops_playing
        );
        Ok(manager)
    }

    fn build(engine: Arc<dyn StreamEngine>, endpoint: Option<String>) -> Self {
        Self {
            core: Arc::new(ManagerCore {
                id: Uuid::new_v4(),
                engine,
                state: Mutex::new(ManagerState::new(endpoint)),
                commands: ReentrantMutex::new(()),
            }),
        }
    }

    pub(crate) fn from_core(core: Arc<ManagerCore>) -> Self {
        Self { core }
    }

    fn session(&self, id: u64) -> EngineSession {
        EngineSession::new(id, Arc::downgrade(&self.core))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Unique identifier of this manager instance.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.core.id
    }

    /// Returns true if both handles refer to the same manager.
    #[must_use]
    pub fn ptr_eq(&self, other: &RadioManager) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }

    /// Current playback status.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.core.state.lock().status
    }

    /// True while loading or playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status().is_active()
    }

    /// The configured stream endpoint.
    #[must_use]
    pub fn stream_endpoint(&self) -> Option<String> {
        self.core.state.lock().endpoint.clone()
    }

    pub(crate) fn current_session(&self) -> Option<u64> {
        self.core.state.lock().session
    }

    /// Whether `pause()` stops the stream instead of pausing it.
    #[must_use]
    pub fn pause_stops_playing(&self) -> bool {
        self.core.state.lock().pause_stops_playing
    }

    pub fn set_pause_stops_playing(&self, value: bool) {
        self.core.state.lock().pause_stops_playing = value;
    }

    /// The bound metadata parser.
    #[must_use]
    pub fn metadata_parser(&self) -> Option<Arc<dyn MetadataParser>> {
        self.core.state.lock().parser.clone()
    }

    /// Binds the parser used for subsequent metadata updates.
    pub fn set_metadata_parser(&self, parser: Arc<dyn MetadataParser>) {
        log::debug!("[RadioManager] Metadata parser set to '{}'", parser.name());
        self.core.state.lock().parser = Some(parser);
    }

    /// Unbinds the parser; metadata updates are dropped until a new one is set.
    pub fn clear_metadata_parser(&self) {
        self.core.state.lock().parser = None;
    }

    /// Sets the delegate. The manager keeps only a weak reference.
    pub fn set_delegate<D: RadioDelegate + 'static>(&self, delegate: &Arc<D>) {
        let weak: Weak<dyn RadioDelegate> = Arc::downgrade(delegate) as Weak<dyn RadioDelegate>;
        self.set_delegate_weak(weak);
    }

    /// Sets the delegate from an existing weak reference.
    pub fn set_delegate_weak(&self, delegate: Weak<dyn RadioDelegate>) {
        self.core.state.lock().delegate = Some(delegate);
    }

    pub fn clear_delegate(&self) {
        self.core.state.lock().delegate = None;
    }

    /// Attaches a now-playing relay. Parsed metadata is pushed to it and it is
    /// cleared whenever playback stops.
    pub fn set_media_center(&self, media: MediaCenter) {
        self.core.state.lock().media = Some(media);
    }

    pub fn clear_media_center(&self) {
        self.core.state.lock().media = None;
    }

    /// Replaces the stream endpoint.
    ///
    /// While loading or playing this runs [`change_stream`](Self::change_stream).
    /// While paused the stream is stopped first and stays stopped.
    pub fn set_stream_endpoint(&self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        let mut pending = Vec::new();
        {
            let _commands = self.core.commands.lock();
            match self.status() {
                PlaybackStatus::Loading | PlaybackStatus::Playing => {
                    log::info!("[RadioManager] Changing stream to {}", endpoint);
                    self.halt(Some(endpoint), &mut pending);
                    self.launch(&mut pending);
                }
                PlaybackStatus::Paused => self.halt(Some(endpoint), &mut pending),
                PlaybackStatus::Stopped => {
                    self.core.state.lock().endpoint = Some(endpoint);
                }
            }
        }
        deliver_all(pending);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Playback Control
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts (from `Stopped`) or resumes (from `Paused`) playback.
    ///
    /// Status becomes `Loading` right away and `Playing` once the engine
    /// reports readiness. No-op while already loading or playing.
    pub fn play(&self) {
        let mut pending = Vec::new();
        {
            let _commands = self.core.commands.lock();
            self.launch(&mut pending);
        }
        deliver_all(pending);
    }

    /// Tears down the engine session and moves to `Stopped`.
    ///
    /// Safe in any status. Events from the abandoned session are ignored.
    pub fn stop(&self) {
        let mut pending = Vec::new();
        {
            let _commands = self.core.commands.lock();
            self.halt(None, &mut pending);
        }
        deliver_all(pending);
    }

    /// Pauses playback.
    ///
    /// With `pause_stops_playing` set this is [`stop`](Self::stop). A stream
    /// that is still loading cannot be paused and is stopped instead.
    pub fn pause(&self) {
        let mut pending = Vec::new();
        {
            let _commands = self.core.commands.lock();
            let paused = {
                let mut state = self.core.state.lock();
                let status = state.status;
                if state.pause_stops_playing {
                    None
                } else {
                    match status {
                        PlaybackStatus::Playing => Some(state.transition(PlaybackStatus::Paused)),
                        PlaybackStatus::Loading => None,
                        PlaybackStatus::Paused | PlaybackStatus::Stopped => {
                            log::debug!("[RadioManager] pause() ignored, {}", status);
                            return;
                        }
                    }
                }
            };

            match paused {
                Some(transition) => {
                    pending.extend(transition);
                    if let Err(e) = self.core.engine.pause() {
                        log::warn!("[RadioManager] Engine could not pause, stopping: {}", e);
                        self.halt(None, &mut pending);
                    }
                }
                None => self.halt(None, &mut pending),
            }
        }
        deliver_all(pending);
    }

    /// Pauses (or stops) when loading/playing, plays otherwise.
    pub fn toggle_play_pause(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stops when loading/playing, plays otherwise. Ignores
    /// `pause_stops_playing`.
    pub fn toggle_play_stop(&self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.play();
        }
    }

    /// Stops, switches to `endpoint`, and plays.
    ///
    /// The engine never sees a live endpoint swap. The new endpoint is in
    /// place before `on_stopped` fires, so a delegate that restarts playback
    /// from that callback gets the new stream.
    pub fn change_stream(&self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        log::info!("[RadioManager] Changing stream to {}", endpoint);
        let mut pending = Vec::new();
        {
            let _commands = self.core.commands.lock();
            self.halt(Some(endpoint), &mut pending);
            self.launch(&mut pending);
        }
        deliver_all(pending);
    }

    /// Abandons the current session, optionally swaps the endpoint, settles
    /// on `Stopped` and tears the engine down. Caller holds the command lock.
    fn halt(&self, endpoint: Option<String>, pending: &mut Vec<Transition>) {
        {
            let mut state = self.core.state.lock();
            if let Some(session) = state.session.take() {
                log::info!("[RadioManager] Stopping session #{}", session);
            }
            if endpoint.is_some() {
                state.endpoint = endpoint;
            }
            pending.extend(state.transition(PlaybackStatus::Stopped));
        }
        self.core.engine.teardown();
    }

    /// Starts a new session or resumes the paused one. Caller holds the
    /// command lock.
    fn launch(&self, pending: &mut Vec<Transition>) {
        enum Command {
            Start(String),
            Resume,
        }

        let (session, command) = {
            let mut state = self.core.state.lock();
            let status = state.status;
            if status.is_active() {
                log::debug!("[RadioManager] play() ignored, already {}", status);
                return;
            }

            let paused_session = if status == PlaybackStatus::Paused {
                state.session
            } else {
                None
            };

            let (session, command) = match paused_session {
                Some(session) => (session, Command::Resume),
                None => {
                    let Some(endpoint) = state.endpoint.clone() else {
                        log::warn!("[RadioManager] play() without a stream endpoint");
                        return;
                    };
                    (state.begin_session(), Command::Start(endpoint))
                }
            };
            pending.extend(state.transition(PlaybackStatus::Loading));
            (session, command)
        };

        let result = match command {
            Command::Start(endpoint) => {
                log::info!("[RadioManager] Starting session #{} for {}", session, endpoint);
                self.core.engine.start(&endpoint, self.session(session))
            }
            Command::Resume => {
                log::info!("[RadioManager] Resuming session #{}", session);
                self.core.engine.resume(self.session(session))
            }
        };

        if let Err(e) = result {
            log::warn!("[RadioManager] Engine rejected session #{}: {}", session, e);
            let mut state = self.core.state.lock();
            if state.is_current(session) {
                state.session = None;
                pending.extend(state.transition(PlaybackStatus::Stopped));
            }
        }
    }

    /// Maps a remote-control event to the matching operation.
    pub fn process_remote_control_event(&self, event: RemoteControlEvent) {
        log::debug!("[RadioManager] Remote control event {:?}", event);
        match event {
            RemoteControlEvent::Play => self.play(),
            RemoteControlEvent::Pause => self.pause(),
            RemoteControlEvent::Stop => self.stop(),
            RemoteControlEvent::TogglePlayPause => self.toggle_play_pause(),
            RemoteControlEvent::TogglePlayStop => self.toggle_play_stop(),
            RemoteControlEvent::Unknown => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Engine Reports
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn handle_engine_event(&self, session: u64, event: EngineEvent) {
        match event {
            EngineEvent::Ready => {
                self.engine_transition(session, PlaybackStatus::Loading, PlaybackStatus::Playing)
            }
            EngineEvent::Buffering => {
                self.engine_transition(session, PlaybackStatus::Playing, PlaybackStatus::Loading)
            }
            EngineEvent::Metadata(raw) => self.handle_metadata(session, &raw),
            EngineEvent::Failed(reason) => {
                log::warn!("[RadioManager] Session #{} failed: {}", session, reason);
                self.end_session(session);
            }
            EngineEvent::Ended => {
                log::info!("[RadioManager] Session #{} ended by server", session);
                self.end_session(session);
            }
        }
    }

    fn engine_transition(&self, session: u64, from: PlaybackStatus, to: PlaybackStatus) {
        let transition = {
            let mut state = self.core.state.lock();
            if !state.is_current(session) {
                log::debug!("[RadioManager] Ignoring {} from stale session #{}", to, session);
                return;
            }
            if state.status != from {
                log::trace!(
                    "[RadioManager] Ignoring {} report while {}",
                    to,
                    state.status
                );
                return;
            }
            state.transition(to)
        };
        deliver(transition);
    }

    /// Abandons `session` (if still current) and settles on `Stopped`.
    fn end_session(&self, session: u64) {
        let transition = {
            let mut state = self.core.state.lock();
            if !state.is_current(session) {
                return;
            }
            state.session = None;
            state.transition(PlaybackStatus::Stopped)
        };
        deliver(transition);
    }

    fn handle_metadata(&self, session: u64, raw: &str) {
        let parser = {
            let state = self.core.state.lock();
            if !state.is_current(session) {
                log::debug!("[RadioManager] Ignoring metadata from stale session #{}", session);
                return;
            }
            state.parser.clone()
        };

        let Some(parser) = parser else {
            log::debug!("[RadioManager] No metadata parser, dropping {:?}", raw);
            return;
        };

        let metadata = parser.parse(raw);

        // Parsing happens outside the lock; the session may have moved on.
        let (delegate, media) = {
            let state = self.core.state.lock();
            if !state.is_current(session) {
                return;
            }
            (state.delegate.clone(), state.media.clone())
        };

        if let Some(delegate) = delegate.as_ref().and_then(Weak::upgrade) {
            delegate.on_metadata_updated(&metadata);
        }
        if let Some(media) = media {
            media.send_media_info_with_mapping(&metadata);
        }
    }
}
