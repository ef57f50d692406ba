//! Terminal doubles: line sources and a shared prompt buffer.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::session::{LineEvent, LineSource, SessionControl, TerminalLineSource};

/// Replays a fixed script and then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    events: VecDeque<LineEvent>,
}

impl ScriptedLines {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            events: lines
                .into_iter()
                .map(|line| LineEvent::Line(line.into()))
                .collect(),
        }
    }

    /// Replays `events` verbatim.
    pub fn events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = LineEvent>,
    {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self, _control: &SessionControl) -> io::Result<LineEvent> {
        Ok(self.events.pop_front().unwrap_or(LineEvent::EndOfInput))
    }
}

/// Reads raw bytes line by line, surfacing undecodable lines as errors.
#[derive(Debug)]
pub struct ReaderLines<R> {
    reader: R,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self, _control: &SessionControl) -> io::Result<LineEvent> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(LineEvent::EndOfInput);
        }
        Ok(LineEvent::Line(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

/// Terminal source whose reader thread waits on lines typed by the test.
pub fn channel_terminal() -> (Sender<String>, TerminalLineSource) {
    let (sender, lines) = mpsc::channel::<String>();
    let source = TerminalLineSource::spawn_with(move || {
        let read = move || -> io::Result<LineEvent> {
            Ok(lines.recv().map_or(LineEvent::EndOfInput, LineEvent::Line))
        };
        Ok(read)
    })
    .expect("spawn terminal reader");
    (sender, source)
}

/// Prompt writer whose output the test can inspect and wait on.
#[derive(Debug, Clone, Default)]
pub struct SharedPrompt {
    inner: Arc<(Mutex<Vec<u8>>, Condvar)>,
}

impl SharedPrompt {
    pub fn contents(&self) -> String {
        let (buffer, _) = &*self.inner;
        String::from_utf8_lossy(&buffer.lock().expect("prompt mutex poisoned")).into_owned()
    }

    /// Number of prompts written so far.
    pub fn prompts(&self) -> usize {
        self.contents().matches(crate::audit::INPUT_MARKER).count()
    }

    /// Waits until at least `count` prompts have been written.
    pub fn wait_for_prompts(&self, count: usize, timeout: Duration) -> Result<(), String> {
        let deadline = Instant::now() + timeout;
        let (buffer, written) = &*self.inner;
        let mut guard = buffer.lock().expect("prompt mutex poisoned");
        loop {
            let seen = String::from_utf8_lossy(&guard)
                .matches(crate::audit::INPUT_MARKER)
                .count();
            if seen >= count {
                return Ok(());
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(format!("expected {count} prompts, saw {seen}"));
            }
            guard = written
                .wait_timeout(guard, remaining)
                .expect("prompt mutex poisoned")
                .0;
        }
    }
}

impl Write for SharedPrompt {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let (buffer, written) = &*self.inner;
        buffer
            .lock()
            .expect("prompt mutex poisoned")
            .extend_from_slice(data);
        written.notify_all();
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
