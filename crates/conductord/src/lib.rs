//! Interactive operator console for a long-running server process.
//!
//! The console reads one command per line from the terminal, records every
//! accepted line in an audit trail, and dispatches it to a registered
//! executor. A [`LifecycleController`] owns the server handle and guarantees
//! that the handle is stopped at most once, whether shutdown comes from the
//! `exit` command or from an interrupt signal.
//!
//! Settings live in a JSON document on disk. A missing document is replaced
//! by built-in defaults which are written back immediately; `reload` swaps
//! the active settings as a whole value and `save` writes them back with a
//! four-space indent.
//!
//! All shared state is carried by an explicit [`ConsoleContext`] built once
//! by [`run_console`] and handed to the session, the interrupt listener, and
//! every command executor.

mod audit;
mod bootstrap;
mod commands;
mod context;
mod lifecycle;
mod process;
mod reporter;
mod session;
mod settings;
mod telemetry;

pub use audit::{AuditLog, INPUT_MARKER};
pub use bootstrap::{ConfigLoader, StaticConfigLoader, SystemConfigLoader};
pub use commands::{
    CommandError, CommandRegistry, CommandScope, CommandSpec, ConsoleCommand, DispatchOutcome,
    ExitCommand, HelpCommand, HistoryCommand, RegistryError, ReloadCommand, SaveCommand,
    builtin_commands, split_command_line,
};
pub use context::ConsoleContext;
pub use lifecycle::{
    HeadlessServer, LifecycleController, LifecycleError, LifecycleState, ServerHandle,
    StopOutcome,
};
pub use process::{
    LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_console,
    run_console_with_loader,
};
pub use reporter::{ConsoleReporter, StructuredConsoleReporter};
pub use session::{
    CommandHistory, InteractiveSession, LineEvent, LineSource, SessionControl, SessionEnd,
    SessionError, SessionState, TerminalLineSource,
};
pub use settings::{LoadedSettings, Settings, SettingsError, SettingsOrigin, SettingsStore};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
