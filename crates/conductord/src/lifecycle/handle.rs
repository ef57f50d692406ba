//! The server handle collaborator driven by the lifecycle controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::settings::Settings;

const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");

/// Long-running process object controlled by the console.
///
/// Networking and simulation live behind this trait. Implementations must
/// tolerate calls from the interrupt listener thread.
#[cfg_attr(test, mockall::automock)]
pub trait ServerHandle: Send + Sync {
    /// Begins the handle's running behaviour.
    fn start(&self);

    /// Runs the handle's shutdown sequence.
    fn stop(&self);

    /// Replaces the settings document the handle reads from.
    fn apply_settings(&self, settings: Arc<Settings>);
}

/// Minimal handle used when the console runs without a domain server.
///
/// It tracks whether it is running and which settings are active, logging
/// every transition.
#[derive(Debug, Default)]
pub struct HeadlessServer {
    running: AtomicBool,
    settings: RwLock<Option<Arc<Settings>>>,
}

impl HeadlessServer {
    /// Builds a stopped handle with no settings applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether [`ServerHandle::start`] has run without a later stop.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The most recently applied settings document.
    #[must_use]
    pub fn settings(&self) -> Option<Arc<Settings>> {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ServerHandle for HeadlessServer {
    fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
        let name = self
            .settings()
            .and_then(|settings| settings.get("serverName").cloned());
        info!(
            target: SERVER_TARGET,
            server_name = ?name,
            "server handle running"
        );
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        info!(target: SERVER_TARGET, "server handle stopped");
    }

    fn apply_settings(&self, settings: Arc<Settings>) {
        let entries = settings.len();
        *self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(settings);
        info!(
            target: SERVER_TARGET,
            entries,
            "server handle settings replaced"
        );
    }
}
