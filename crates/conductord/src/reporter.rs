//! Operator-facing output for the console.

use std::sync::Arc;

use crate::audit::AuditLog;

const CONSOLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::console");
const OUTPUT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::output");

/// Sink for messages addressed to the operator at the terminal.
pub trait ConsoleReporter: Send + Sync {
    /// Status notices about the console itself.
    fn inform(&self, message: &str);

    /// Command output such as `done`.
    fn print(&self, message: &str);

    /// Records one line of operator input in the persistent audit trail.
    fn audit(&self, line: &str);

    /// Recoverable failures shown as a single-line diagnostic.
    fn warn(&self, message: &str);
}

impl<T> ConsoleReporter for Arc<T>
where
    T: ConsoleReporter,
{
    fn inform(&self, message: &str) {
        (**self).inform(message);
    }

    fn print(&self, message: &str) {
        (**self).print(message);
    }

    fn audit(&self, line: &str) {
        (**self).audit(line);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}

/// Default reporter: `tracing` for terminal output plus an [`AuditLog`].
#[derive(Debug)]
pub struct StructuredConsoleReporter {
    audit: AuditLog,
}

impl StructuredConsoleReporter {
    /// Builds a reporter appending operator input to `audit`.
    #[must_use]
    pub const fn new(audit: AuditLog) -> Self {
        Self { audit }
    }
}

impl ConsoleReporter for StructuredConsoleReporter {
    fn inform(&self, message: &str) {
        tracing::info!(target: CONSOLE_TARGET, "{message}");
    }

    fn print(&self, message: &str) {
        tracing::info!(target: OUTPUT_TARGET, "{message}");
    }

    fn audit(&self, line: &str) {
        tracing::debug!(
            target: CONSOLE_TARGET,
            event = "operator_input",
            line,
            "operator input"
        );
        if let Err(error) = self.audit.record(line) {
            tracing::warn!(
                target: CONSOLE_TARGET,
                file = %self.audit.path(),
                %error,
                "failed to append to audit log"
            );
        }
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: CONSOLE_TARGET, "{message}");
    }
}
