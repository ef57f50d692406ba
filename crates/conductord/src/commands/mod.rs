//! Named console commands.
//!
//! Every command implements [`ConsoleCommand`] and lives in a
//! [`CommandRegistry`]. The registry splits an input line into a name and the
//! remaining argument text, runs the matching executor, and reports unknown
//! names to its caller without logging anything itself.

mod builtin;
mod errors;
mod registry;

use std::fmt;

use crate::context::ConsoleContext;

pub use builtin::{
    ExitCommand, HelpCommand, HistoryCommand, ReloadCommand, SaveCommand, builtin_commands,
};
pub use errors::{CommandError, RegistryError};
pub use registry::{CommandRegistry, DispatchOutcome, split_command_line};

/// A single operator action addressed by name.
pub trait ConsoleCommand: Send + Sync {
    /// Unique name typed at the prompt.
    fn name(&self) -> &str;

    /// Human description of the accepted argument text.
    fn args(&self) -> &str {
        ""
    }

    /// One-line description shown by `help`.
    fn description(&self) -> &str;

    /// Runs the command with the text following its name.
    ///
    /// # Errors
    ///
    /// Executors report failures to the caller; the registry never swallows
    /// them.
    fn execute(&self, scope: &CommandScope<'_>, args: &str) -> Result<(), CommandError>;
}

/// What an executor can reach while it runs.
#[derive(Clone, Copy)]
pub struct CommandScope<'a> {
    context: &'a ConsoleContext,
    registry: &'a CommandRegistry,
}

impl<'a> CommandScope<'a> {
    pub(crate) const fn new(context: &'a ConsoleContext, registry: &'a CommandRegistry) -> Self {
        Self { context, registry }
    }

    /// Shared console context.
    #[must_use]
    pub const fn context(&self) -> &'a ConsoleContext {
        self.context
    }

    /// Registry the command was dispatched from.
    #[must_use]
    pub const fn registry(&self) -> &'a CommandRegistry {
        self.registry
    }
}

impl fmt::Debug for CommandScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandScope")
            .field("commands", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Command assembled from a name, descriptions, and a closure.
///
/// Convenient for domain commands that need no state of their own.
pub struct CommandSpec<F> {
    name: String,
    args: String,
    description: String,
    executor: F,
}

impl<F> CommandSpec<F>
where
    F: Fn(&CommandScope<'_>, &str) -> Result<(), CommandError> + Send + Sync,
{
    /// Builds a command from its parts.
    pub fn new(
        name: impl Into<String>,
        args: impl Into<String>,
        description: impl Into<String>,
        executor: F,
    ) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            description: description.into(),
            executor,
        }
    }
}

impl<F> ConsoleCommand for CommandSpec<F>
where
    F: Fn(&CommandScope<'_>, &str) -> Result<(), CommandError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn args(&self) -> &str {
        &self.args
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, scope: &CommandScope<'_>, args: &str) -> Result<(), CommandError> {
        (self.executor)(scope, args)
    }
}

impl<F> fmt::Debug for CommandSpec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
