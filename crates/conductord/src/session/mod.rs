//! The interactive prompt/read/dispatch loop.
//!
//! One line is read and dispatched at a time; the next prompt is only armed
//! after the current executor returns. The loop has two states, open and
//! closing. The closing flag is checked before each prompt and again as
//! soon as a read resumes, so an `exit` or an interrupt that lands while a
//! read is pending stops the loop without dispatching anything further.
//! Undecodable input costs the operator that one line, never the session.

mod history;
mod input;

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::audit::INPUT_MARKER;
use crate::commands::{CommandRegistry, DispatchOutcome, split_command_line};
use crate::context::ConsoleContext;

pub use history::CommandHistory;
pub use input::{LineEvent, LineSource, TerminalLineSource};

const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Shared closing flag for the session.
#[derive(Debug, Clone, Default)]
pub struct SessionControl {
    closing: Arc<AtomicBool>,
}

impl SessionControl {
    /// Builds an open session flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session as closing. Irreversible.
    pub fn close(&self) {
        self.closing.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`Self::close`] has been called.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::SeqCst)
    }
}

/// State of the read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Prompting and dispatching.
    Open,
    /// No further prompts will be issued.
    Closing,
}

/// Why the loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The session was closed by `exit` or the interrupt listener.
    Closed,
    /// The input stream ended. The handle keeps running.
    EndOfInput,
}

/// Failures of the terminal itself.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Writing the prompt failed.
    #[error("failed to write prompt: {source}")]
    Prompt {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Reading operator input failed.
    #[error("failed to read operator input: {source}")]
    Input {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

enum Cycle {
    Continue,
    Finished(SessionEnd),
}

/// Prompt/read/dispatch loop bound to a line source and a prompt writer.
pub struct InteractiveSession<S, W> {
    context: ConsoleContext,
    registry: CommandRegistry,
    source: S,
    prompt: W,
    startup_delay: Duration,
    state: SessionState,
}

impl<S, W> InteractiveSession<S, W>
where
    S: LineSource,
    W: Write,
{
    /// Builds a session. `startup_delay` is waited once before the first
    /// prompt.
    pub fn new(
        context: ConsoleContext,
        registry: CommandRegistry,
        source: S,
        prompt: W,
        startup_delay: Duration,
    ) -> Self {
        Self {
            context,
            registry,
            source,
            prompt,
            startup_delay,
            state: SessionState::Open,
        }
    }

    /// Current loop state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Registry commands are dispatched through.
    #[must_use]
    pub const fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs until the session closes or input ends.
    ///
    /// # Errors
    ///
    /// Returns prompt or input failures. The session is closed before the
    /// error is returned.
    pub fn run(&mut self) -> Result<SessionEnd, SessionError> {
        self.context.reporter().inform("command stream open");
        if !self.startup_delay.is_zero() {
            thread::sleep(self.startup_delay);
        }
        loop {
            match self.cycle() {
                Ok(Cycle::Continue) => {}
                Ok(Cycle::Finished(end)) => {
                    self.enter_closing();
                    return Ok(end);
                }
                Err(error) => {
                    self.enter_closing();
                    return Err(error);
                }
            }
        }
    }

    fn cycle(&mut self) -> Result<Cycle, SessionError> {
        if self.context.session().is_closing() {
            return Ok(Cycle::Finished(SessionEnd::Closed));
        }
        self.write_prompt()?;
        let event = match self.source.next_line(self.context.session()) {
            Ok(event) => event,
            Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                self.context
                    .reporter()
                    .warn(&format!("discarded unreadable input: {error}"));
                return Ok(Cycle::Continue);
            }
            Err(source) => return Err(SessionError::Input { source }),
        };
        if self.context.session().is_closing() {
            return Ok(Cycle::Finished(SessionEnd::Closed));
        }
        match event {
            LineEvent::Line(line) => {
                self.dispatch(&line);
                Ok(Cycle::Continue)
            }
            LineEvent::Interrupted => {
                self.context.interrupt();
                Ok(Cycle::Finished(SessionEnd::Closed))
            }
            LineEvent::EndOfInput => {
                debug!(target: SESSION_TARGET, "input stream ended");
                Ok(Cycle::Finished(SessionEnd::EndOfInput))
            }
        }
    }

    fn dispatch(&self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        self.context.record_history(line);
        self.context.reporter().audit(line);
        let (name, _) = split_command_line(line);
        match self.registry.execute(&self.context, line) {
            Ok(DispatchOutcome::Executed) => {}
            Ok(DispatchOutcome::Unknown) => {
                self.context
                    .reporter()
                    .warn(&format!("unknown command {name}"));
            }
            Err(error) => {
                self.context
                    .reporter()
                    .warn(&format!("command {name} failed: {error}"));
            }
        }
    }

    fn write_prompt(&mut self) -> Result<(), SessionError> {
        write!(self.prompt, "{INPUT_MARKER} ")
            .and_then(|()| self.prompt.flush())
            .map_err(|source| SessionError::Prompt { source })
    }

    fn enter_closing(&mut self) {
        self.state = SessionState::Closing;
        self.context.session().close();
    }
}
