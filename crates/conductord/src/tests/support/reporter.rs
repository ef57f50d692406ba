//! Test double for [`ConsoleReporter`] that records operator output.

use std::sync::Mutex;

use crate::reporter::ConsoleReporter;

/// Operator-facing output captured during a test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConsoleEvent {
    /// Status notice.
    Inform(String),
    /// Command output.
    Print(String),
    /// Audited operator input.
    Audit(String),
    /// Recoverable failure.
    Warn(String),
}

/// Records console events for assertions.
#[derive(Debug, Default)]
pub struct RecordingConsoleReporter {
    events: Mutex<Vec<ConsoleEvent>>,
}

impl RecordingConsoleReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.events
            .lock()
            .expect("console reporter mutex poisoned")
            .clone()
    }

    pub fn informed(&self) -> Vec<String> {
        self.filter(|event| match event {
            ConsoleEvent::Inform(message) => Some(message),
            _ => None,
        })
    }

    pub fn printed(&self) -> Vec<String> {
        self.filter(|event| match event {
            ConsoleEvent::Print(message) => Some(message),
            _ => None,
        })
    }

    pub fn audited(&self) -> Vec<String> {
        self.filter(|event| match event {
            ConsoleEvent::Audit(line) => Some(line),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.filter(|event| match event {
            ConsoleEvent::Warn(message) => Some(message),
            _ => None,
        })
    }

    fn filter<F>(&self, select: F) -> Vec<String>
    where
        F: Fn(&ConsoleEvent) -> Option<&String>,
    {
        self.events()
            .iter()
            .filter_map(select)
            .cloned()
            .collect()
    }

    fn record(&self, event: ConsoleEvent) {
        self.events
            .lock()
            .expect("console reporter mutex poisoned")
            .push(event);
    }
}

impl ConsoleReporter for RecordingConsoleReporter {
    fn inform(&self, message: &str) {
        self.record(ConsoleEvent::Inform(message.to_owned()));
    }

    fn print(&self, message: &str) {
        self.record(ConsoleEvent::Print(message.to_owned()));
    }

    fn audit(&self, line: &str) {
        self.record(ConsoleEvent::Audit(line.to_owned()));
    }

    fn warn(&self, message: &str) {
        self.record(ConsoleEvent::Warn(message.to_owned()));
    }
}
