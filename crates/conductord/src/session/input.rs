//! Line sources feeding the interactive session.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use tracing::debug;

use crate::audit::INPUT_MARKER;

use super::{SESSION_TARGET, SessionControl};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// One line of operator input without its terminator.
    Line(String),
    /// The operator pressed the interrupt key while the terminal was in raw
    /// mode.
    Interrupted,
    /// The input stream ended, or the session closed during the read.
    EndOfInput,
}

/// Supplies operator input one line at a time.
pub trait LineSource {
    /// Suspends until a line arrives, the input ends, or the session closes.
    ///
    /// # Errors
    ///
    /// Returns read failures from the underlying stream. Undecodable input is
    /// reported as [`io::ErrorKind::InvalidData`].
    fn next_line(&mut self, control: &SessionControl) -> io::Result<LineEvent>;
}

/// Terminal input read by a `rustyline` editor on a dedicated thread.
///
/// The editor provides line editing and history navigation. A read is only
/// requested when the session asks for the next line, so the prompt is never
/// redrawn while a command runs. A pending read is abandoned as soon as the
/// session closes.
#[derive(Debug)]
pub struct TerminalLineSource {
    requests: Sender<()>,
    events: Receiver<io::Result<LineEvent>>,
    pending: bool,
}

impl TerminalLineSource {
    /// Starts the editor thread. The editor keeps at most `history_size`
    /// entries and skips a line equal to the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor cannot be created or the thread cannot
    /// be spawned.
    pub fn spawn(history_size: usize) -> io::Result<Self> {
        Self::spawn_with(move || editor_reader(history_size))
    }

    /// Starts a reader thread around the reader returned by `factory`.
    pub(crate) fn spawn_with<F, R>(factory: F) -> io::Result<Self>
    where
        F: FnOnce() -> io::Result<R> + Send + 'static,
        R: FnMut() -> io::Result<LineEvent>,
    {
        let (requests, request_rx) = mpsc::channel::<()>();
        let (event_tx, events) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        thread::Builder::new()
            .name("console-stdin".to_owned())
            .spawn(move || {
                let mut read = match factory() {
                    Ok(read) => {
                        let _ = ready_tx.send(Ok(()));
                        read
                    }
                    Err(error) => {
                        let _ = ready_tx.send(Err(error));
                        return;
                    }
                };
                for () in request_rx {
                    if event_tx.send(read()).is_err() {
                        break;
                    }
                }
            })?;
        ready_rx
            .recv()
            .map_err(|_| io::Error::other("terminal reader exited during start-up"))??;
        Ok(Self {
            requests,
            events,
            pending: false,
        })
    }
}

impl LineSource for TerminalLineSource {
    fn next_line(&mut self, control: &SessionControl) -> io::Result<LineEvent> {
        if !self.pending {
            if self.requests.send(()).is_err() {
                return Ok(LineEvent::EndOfInput);
            }
            self.pending = true;
        }
        loop {
            if control.is_closing() {
                return Ok(LineEvent::EndOfInput);
            }
            match self.events.recv_timeout(POLL_INTERVAL) {
                Ok(event) => {
                    self.pending = false;
                    return event;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(LineEvent::EndOfInput),
            }
        }
    }
}

fn editor_reader(history_size: usize) -> io::Result<impl FnMut() -> io::Result<LineEvent>> {
    let config = Config::builder()
        .max_history_size(history_size)
        .and_then(|builder| builder.history_ignore_dups(true))
        .map_err(into_io)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(config).map_err(into_io)?;
    let prompt = format!("{INPUT_MARKER} ");
    Ok(move || match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty()
                && let Err(error) = editor.add_history_entry(line.as_str())
            {
                debug!(target: SESSION_TARGET, %error, "editor history entry dropped");
            }
            Ok(LineEvent::Line(line))
        }
        Err(ReadlineError::Interrupted) => Ok(LineEvent::Interrupted),
        Err(ReadlineError::Eof) => Ok(LineEvent::EndOfInput),
        Err(error) => Err(into_io(error)),
    })
}

fn into_io(error: ReadlineError) -> io::Error {
    match error {
        ReadlineError::Io(error) => error,
        other => io::Error::other(other),
    }
}
