//! Running/stopping state of the server handle.
//!
//! Two independent triggers can ask for shutdown: the `exit` command on the
//! session thread and the interrupt listener on its own thread. The
//! controller turns both into a guarded forward-only transition so the
//! handle's shutdown sequence runs at most once.

mod handle;

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock};

use thiserror::Error;
use tracing::{debug, info};

use crate::settings::Settings;

pub use handle::{HeadlessServer, ServerHandle};

#[cfg(test)]
pub(crate) use handle::MockServerHandle;

pub(crate) const LIFECYCLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lifecycle");

/// Lifecycle of the server handle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed but not yet started.
    Idle,
    /// The handle is running.
    Running,
    /// A stop was accepted and the shutdown sequence is in flight.
    StoppingRequested,
    /// Terminal for the process lifetime.
    Stopped,
}

impl LifecycleState {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::StoppingRequested => "stopping",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a call to [`LifecycleController::stop`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// This call ran the handle's shutdown sequence.
    Performed,
    /// Another caller already requested or completed the shutdown.
    AlreadyStopping,
    /// The handle had never been started; no shutdown sequence ran.
    NeverStarted,
}

/// Errors raised by lifecycle transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The handle cannot be restarted once a stop has been accepted.
    #[error("server handle cannot start from the {state} state")]
    Terminated {
        /// State observed when the start was attempted.
        state: LifecycleState,
    },
}

/// Owns the handle's lifecycle state and its active settings.
pub struct LifecycleController {
    handle: Arc<dyn ServerHandle>,
    state: Mutex<LifecycleState>,
    stopped: Condvar,
    settings: RwLock<Arc<Settings>>,
}

impl fmt::Debug for LifecycleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl LifecycleController {
    /// Builds a controller in the [`LifecycleState::Idle`] state and hands
    /// the initial settings to the handle.
    pub fn new(handle: Arc<dyn ServerHandle>, settings: Settings) -> Self {
        let settings = Arc::new(settings);
        handle.apply_settings(Arc::clone(&settings));
        Self {
            handle,
            state: Mutex::new(LifecycleState::Idle),
            stopped: Condvar::new(),
            settings: RwLock::new(settings),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        *self.lock_state()
    }

    /// Starts the handle. Starting a running handle is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Terminated`] once a stop has been accepted.
    pub fn start(&self) -> Result<(), LifecycleError> {
        let mut state = self.lock_state();
        match *state {
            LifecycleState::Idle => {
                // Held across the call so a racing stop waits for a complete start.
                self.handle.start();
                *state = LifecycleState::Running;
                info!(target: LIFECYCLE_TARGET, "server handle started");
                Ok(())
            }
            LifecycleState::Running => {
                debug!(target: LIFECYCLE_TARGET, "start ignored; already running");
                Ok(())
            }
            terminal @ (LifecycleState::StoppingRequested | LifecycleState::Stopped) => {
                Err(LifecycleError::Terminated { state: terminal })
            }
        }
    }

    /// Stops the handle, running its shutdown sequence at most once.
    ///
    /// Safe to call from any thread and any number of times.
    pub fn stop(&self) -> StopOutcome {
        {
            let mut state = self.lock_state();
            match *state {
                LifecycleState::Running => *state = LifecycleState::StoppingRequested,
                LifecycleState::Idle => {
                    *state = LifecycleState::Stopped;
                    self.stopped.notify_all();
                    info!(target: LIFECYCLE_TARGET, "stopped before start");
                    return StopOutcome::NeverStarted;
                }
                LifecycleState::StoppingRequested | LifecycleState::Stopped => {
                    debug!(
                        target: LIFECYCLE_TARGET,
                        state = state.as_str(),
                        "stop ignored; shutdown already requested"
                    );
                    return StopOutcome::AlreadyStopping;
                }
            }
        }

        info!(target: LIFECYCLE_TARGET, "shutdown requested");
        self.handle.stop();

        *self.lock_state() = LifecycleState::Stopped;
        self.stopped.notify_all();
        info!(target: LIFECYCLE_TARGET, "server handle stopped");
        StopOutcome::Performed
    }

    /// Blocks until the controller reaches [`LifecycleState::Stopped`].
    pub fn wait_until_stopped(&self) {
        let mut state = self.lock_state();
        while *state != LifecycleState::Stopped {
            state = self
                .stopped
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// The active settings document.
    #[must_use]
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swaps the active settings and hands them to the handle without
    /// restarting it.
    pub fn set_settings(&self, settings: Settings) {
        let settings = Arc::new(settings);
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&settings);
        self.handle.apply_settings(settings);
    }

    fn lock_state(&self) -> MutexGuard<'_, LifecycleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
