//! Shared state handed to the session loop, the interrupt listener, and every
//! command executor.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::lifecycle::{LIFECYCLE_TARGET, LifecycleController, StopOutcome};
use crate::reporter::ConsoleReporter;
use crate::session::{CommandHistory, SessionControl};
use crate::settings::{SettingsError, SettingsStore};

/// Explicit context object constructed once at process entry.
///
/// Cloning is cheap; every clone observes the same controller, settings
/// store, reporter, session flag, and history.
#[derive(Clone)]
pub struct ConsoleContext {
    controller: Arc<LifecycleController>,
    store: Arc<SettingsStore>,
    reporter: Arc<dyn ConsoleReporter>,
    session: SessionControl,
    history: Arc<Mutex<CommandHistory>>,
    interrupted: Arc<AtomicBool>,
}

impl fmt::Debug for ConsoleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleContext")
            .field("controller", &self.controller)
            .field("store", &self.store)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ConsoleContext {
    /// Assembles the context.
    pub fn new(
        controller: Arc<LifecycleController>,
        store: SettingsStore,
        reporter: Arc<dyn ConsoleReporter>,
        history_size: usize,
    ) -> Self {
        Self {
            controller,
            store: Arc::new(store),
            reporter,
            session: SessionControl::new(),
            history: Arc::new(Mutex::new(CommandHistory::new(history_size))),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Lifecycle controller owning the server handle.
    #[must_use]
    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }

    /// Store bound to the settings document.
    #[must_use]
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Operator-facing output.
    #[must_use]
    pub fn reporter(&self) -> &dyn ConsoleReporter {
        self.reporter.as_ref()
    }

    /// Closing flag of the interactive session.
    #[must_use]
    pub const fn session(&self) -> &SessionControl {
        &self.session
    }

    /// Appends an accepted line to the session history.
    pub fn record_history(&self, line: &str) {
        self.lock_history().push(line);
    }

    /// The newest `count` history entries, oldest first.
    #[must_use]
    pub fn recent_history(&self, count: usize) -> Vec<String> {
        self.lock_history().latest(count)
    }

    /// Re-reads the settings file and makes it active.
    ///
    /// # Errors
    ///
    /// Returns the read or parse failure; the active settings are left
    /// untouched in that case.
    pub fn reload_settings(&self) -> Result<(), SettingsError> {
        let settings = self.store.reload()?;
        self.controller.set_settings(settings);
        Ok(())
    }

    /// Writes the active settings to the settings file.
    ///
    /// # Errors
    ///
    /// Returns serialisation or filesystem failures.
    pub fn save_settings(&self) -> Result<(), SettingsError> {
        let settings = self.controller.settings();
        self.store.save(&settings)
    }

    /// Stops the handle and closes the session.
    pub fn request_exit(&self) -> StopOutcome {
        let outcome = self.controller.stop();
        self.session.close();
        outcome
    }

    /// Handles the interrupt signal, whether it came from the signal
    /// listener or the terminal. Only the first interrupt is reported.
    pub fn interrupt(&self) -> StopOutcome {
        if self.interrupted.swap(true, Ordering::SeqCst) {
            debug!(target: LIFECYCLE_TARGET, "interrupt already handled");
            return self.request_exit();
        }
        self.reporter.inform("(caught SIGINT)");
        let outcome = self.request_exit();
        info!(
            target: LIFECYCLE_TARGET,
            ?outcome,
            "interrupt handled"
        );
        outcome
    }

    fn lock_history(&self) -> MutexGuard<'_, CommandHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
