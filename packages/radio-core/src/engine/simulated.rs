//! Scripted engine that plays nothing.
//!
//! [`SimulatedEngine`] stands in for a platform audio engine in headless
//! hosts and tests. It "connects" after a delay, reports readiness, then
//! cycles through scripted raw ICY titles until its session goes stale or
//! the engine is torn down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{EngineSession, StreamEngine};
use crate::error::{EngineError, EngineResult};
use crate::runtime::{TaskHandle, TaskSpawner};

/// Timing and script for a [`SimulatedEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedEngineConfig {
    /// Delay between `start` and the `Ready` report.
    pub connect_delay: Duration,
    /// Delay between `resume` and the `Ready` report.
    pub resume_delay: Duration,
    /// Interval between metadata reports.
    pub metadata_interval: Duration,
    /// Raw metadata strings emitted in order, wrapping around.
    pub titles: Vec<String>,
    /// Endpoints that fail after `connect_delay` instead of playing.
    pub unreachable: Vec<String>,
}

impl Default for SimulatedEngineConfig {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_millis(500),
            resume_delay: Duration::from_millis(200),
            metadata_interval: Duration::from_secs(10),
            titles: vec![
                "StreamTitle='Massive Attack - Teardrop';".to_string(),
                "StreamTitle='Portishead - Roads';".to_string(),
                "StreamTitle='Air - La femme d\u{2019}argent';".to_string(),
            ],
            unreachable: Vec::new(),
        }
    }
}

/// Engine that simulates a stream on a [`TaskSpawner`].
pub struct SimulatedEngine<S: TaskSpawner> {
    spawner: S,
    config: SimulatedEngineConfig,
    paused: Arc<AtomicBool>,
    tasks: Mutex<Vec<TaskHandle>>,
}

impl<S: TaskSpawner> SimulatedEngine<S> {
    #[must_use]
    pub fn new(spawner: S, config: SimulatedEngineConfig) -> Self {
        Self {
            spawner,
            config,
            paused: Arc::new(AtomicBool::new(false)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimulatedEngineConfig {
        &self.config
    }

    /// Returns true while the engine holds a paused session.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn track(&self, task: TaskHandle) {
        self.tasks.lock().push(task);
    }

    fn abort_tasks(&self) {
        let tasks = std::mem::take(&mut *self.tasks.lock());
        if !tasks.is_empty() {
            log::debug!("[SimulatedEngine] Aborting {} background task(s)", tasks.len());
        }
        for task in tasks {
            task.abort();
        }
    }
}

fn validate_endpoint(endpoint: &str) -> EngineResult<()> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(EngineError::InvalidEndpoint(format!(
            "unsupported scheme in '{}'",
            endpoint
        )))
    }
}

impl<S: TaskSpawner> StreamEngine for SimulatedEngine<S> {
    fn start(&self, endpoint: &str, session: EngineSession) -> EngineResult<()> {
        validate_endpoint(endpoint)?;
        self.abort_tasks();
        self.paused.store(false, Ordering::SeqCst);

        let connect_delay = self.config.connect_delay;
        let unreachable = self.config.unreachable.iter().any(|e| e == endpoint);
        let endpoint = endpoint.to_string();

        if unreachable {
            self.track(self.spawner.spawn(async move {
                tokio::time::sleep(connect_delay).await;
                log::warn!("[SimulatedEngine] {} is unreachable", endpoint);
                session.failed(format!("{} is unreachable", endpoint));
            }));
            return Ok(());
        }

        let titles = self.config.titles.clone();
        let interval = self.config.metadata_interval;
        let paused = Arc::clone(&self.paused);

        let task = self.spawner.spawn(async move {
            tokio::time::sleep(connect_delay).await;
            if !session.is_current() {
                log::debug!("[SimulatedEngine] Session #{} abandoned while connecting", session.id());
                return;
            }
            log::info!("[SimulatedEngine] Connected to {} (session #{})", endpoint, session.id());
            session.ready();

            if titles.is_empty() {
                return;
            }
            for title in titles.iter().cycle() {
                if !session.is_current() {
                    break;
                }
                if !paused.load(Ordering::SeqCst) {
                    session.metadata(title.as_str());
                }
                tokio::time::sleep(interval).await;
            }
            log::debug!("[SimulatedEngine] Session #{} finished", session.id());
        });
        self.track(task);

        Ok(())
    }

    fn resume(&self, session: EngineSession) -> EngineResult<()> {
        self.paused.store(false, Ordering::SeqCst);
        let delay = self.config.resume_delay;
        self.track(self.spawner.spawn(async move {
            tokio::time::sleep(delay).await;
            if session.is_current() {
                session.ready();
            }
        }));
        Ok(())
    }

    fn pause(&self) -> EngineResult<()> {
        self.paused.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn teardown(&self) {
        self.abort_tasks();
        self.paused.store(false, Ordering::SeqCst);
    }
}
