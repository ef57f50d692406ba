use std::io;
use std::thread::{self, JoinHandle};

use signal_hook::consts::signal::SIGINT;
use signal_hook::iterator::Signals;
use thiserror::Error;
use tracing::{info, warn};

use crate::context::ConsoleContext;

use super::PROCESS_TARGET;

/// Abstraction over the interrupt notification mechanism.
pub trait ShutdownSignal: Send + 'static {
    /// Blocks until the interrupt arrives.
    fn wait(&mut self) -> Result<(), ShutdownError>;
}

/// Errors reported by interrupt listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The signal source closed before an interrupt arrived.
    #[error("signal stream closed before an interrupt arrived")]
    Closed,
    /// Spawning the listener thread failed.
    #[error("failed to spawn interrupt listener: {source}")]
    Spawn {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Interrupt listener backed by `SIGINT`.
///
/// Installing the listener replaces the default terminate action, so later
/// interrupts are absorbed once the first one has been handled.
pub struct SystemShutdownSignal {
    signals: Signals,
}

impl SystemShutdownSignal {
    /// Registers the `SIGINT` handler.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::Install`] when registration fails.
    pub fn install() -> Result<Self, ShutdownError> {
        let signals = Signals::new([SIGINT]).map_err(|source| ShutdownError::Install { source })?;
        Ok(Self { signals })
    }
}

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&mut self) -> Result<(), ShutdownError> {
        let signal = self
            .signals
            .forever()
            .next()
            .ok_or(ShutdownError::Closed)?;
        info!(
            target: PROCESS_TARGET,
            signal,
            "interrupt signal received"
        );
        Ok(())
    }
}

/// Waits for one interrupt on a dedicated thread and then stops the console.
///
/// The listener is not re-armed.
pub(crate) fn spawn_interrupt_listener<S>(
    mut signal: S,
    context: ConsoleContext,
) -> Result<JoinHandle<()>, ShutdownError>
where
    S: ShutdownSignal,
{
    thread::Builder::new()
        .name("console-interrupt".to_owned())
        .spawn(move || match signal.wait() {
            Ok(()) => {
                context.interrupt();
            }
            Err(error) => warn!(
                target: PROCESS_TARGET,
                %error,
                "interrupt listener failed"
            ),
        })
        .map_err(|source| ShutdownError::Spawn { source })
}
