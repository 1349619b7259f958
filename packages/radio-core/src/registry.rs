//! Process-wide manager registry.
//!
//! Hosts that want one manager for the whole process install it here once at
//! startup and fetch it wherever needed. Nothing in the crate requires the
//! registry; tests and multi-stream hosts build [`RadioManager`] values
//! directly.
//!
//! # Lifecycle
//!
//! ```text
//! empty ──install()/get_or_install_with()──▶ installed ──teardown()──▶ empty
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::error::{RadioError, RadioResult};
use crate::manager::RadioManager;

static GLOBAL: OnceLock<ManagerRegistry> = OnceLock::new();

/// Holds at most one shared [`RadioManager`].
#[derive(Debug, Default)]
pub struct ManagerRegistry {
    manager: RwLock<Option<RadioManager>>,
}

impl ManagerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static ManagerRegistry {
        GLOBAL.get_or_init(ManagerRegistry::new)
    }

    /// Installs `manager` as the shared instance.
    ///
    /// # Errors
    ///
    /// Returns [`RadioError::AlreadyInstalled`] if a manager is already
    /// installed; the existing one is left untouched.
    pub fn install(&self, manager: RadioManager) -> RadioResult<RadioManager> {
        let mut slot = self.manager.write();
        if slot.is_some() {
            return Err(RadioError::AlreadyInstalled);
        }
        log::info!("[ManagerRegistry] Installed shared manager {}", manager.id());
        *slot = Some(manager.clone());
        Ok(manager)
    }

    /// Returns the shared manager, creating it with `init` on first access.
    pub fn get_or_install_with<F>(&self, init: F) -> RadioManager
    where
        F: FnOnce() -> RadioManager,
    {
        if let Some(manager) = self.manager.read().as_ref() {
            return manager.clone();
        }
        let mut slot = self.manager.write();
        slot.get_or_insert_with(|| {
            let manager = init();
            log::info!("[ManagerRegistry] Created shared manager {}", manager.id());
            manager
        })
        .clone()
    }

    /// Returns the shared manager. Never starts playback.
    ///
    /// # Errors
    ///
    /// Returns [`RadioError::NotInstalled`] before a manager is installed.
    pub fn shared(&self) -> RadioResult<RadioManager> {
        self.manager
            .read()
            .as_ref()
            .cloned()
            .ok_or(RadioError::NotInstalled)
    }

    /// Returns the shared manager, giving it `endpoint` if it has none yet.
    ///
    /// An endpoint that is already configured is kept. Never starts playback.
    ///
    /// # Errors
    ///
    /// Returns [`RadioError::NotInstalled`] before a manager is installed.
    pub fn shared_with_stream_endpoint(&self, endpoint: impl Into<String>) -> RadioResult<RadioManager> {
        let manager = self.shared()?;
        if manager.stream_endpoint().is_none() {
            manager.set_stream_endpoint(endpoint);
        }
        Ok(manager)
    }

    /// Returns true while a shared manager is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.manager.read().is_some()
    }

    /// Stops and removes the shared manager, returning it.
    pub fn teardown(&self) -> Option<RadioManager> {
        let manager = self.manager.write().take()?;
        manager.stop();
        log::info!("[ManagerRegistry] Tore down shared manager {}", manager.id());
        Some(manager)
    }
}
