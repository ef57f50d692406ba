//! Test harness utilities shared by the unit and behavioural suites.

mod harness;
mod reporter;
mod server;
mod signal;
mod terminal;

pub use harness::{ContextHarness, test_config};
pub use reporter::{ConsoleEvent, RecordingConsoleReporter};
pub use server::RecordingServerHandle;
pub use signal::TestShutdownSignal;
pub use terminal::{ReaderLines, ScriptedLines, SharedPrompt, channel_terminal};
