//! Name-to-command lookup and dispatch.

use indexmap::IndexMap;
use tracing::debug;

use crate::context::ConsoleContext;

use super::errors::{CommandError, RegistryError};
use super::{CommandScope, ConsoleCommand};

const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Result of dispatching an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The named command ran to completion.
    Executed,
    /// No command is registered under the name; nothing ran.
    Unknown,
}

impl DispatchOutcome {
    /// Returns true when a command ran.
    #[must_use]
    pub const fn is_executed(self) -> bool {
        matches!(self, Self::Executed)
    }
}

/// Commands keyed by name, kept in registration order.
///
/// Registering a name twice is rejected and the first registration stays
/// active.
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Box<dyn ConsoleCommand>>,
}

impl CommandRegistry {
    /// Builds an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one command.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when the name is taken and
    /// [`RegistryError::InvalidName`] when it is empty or contains whitespace.
    pub fn register<C>(&mut self, command: C) -> Result<(), RegistryError>
    where
        C: ConsoleCommand + 'static,
    {
        self.register_boxed(Box::new(command))
    }

    /// Adds one boxed command.
    ///
    /// # Errors
    ///
    /// See [`Self::register`].
    pub fn register_boxed(&mut self, command: Box<dyn ConsoleCommand>) -> Result<(), RegistryError> {
        let name = command.name().to_owned();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName { name });
        }
        if self.commands.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        self.commands.insert(name, command);
        Ok(())
    }

    /// Adds several commands, stopping at the first rejection.
    ///
    /// # Errors
    ///
    /// See [`Self::register`]. Commands before the rejected one stay
    /// registered.
    pub fn register_all<I>(&mut self, commands: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Box<dyn ConsoleCommand>>,
    {
        commands
            .into_iter()
            .try_for_each(|command| self.register_boxed(command))
    }

    /// Looks up a command by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ConsoleCommand> {
        self.commands.get(name).map(Box::as_ref)
    }

    /// Returns true when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ConsoleCommand> {
        self.commands.values().map(Box::as_ref)
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolves `line` to a command and runs it.
    ///
    /// # Errors
    ///
    /// Propagates the executor's failure unchanged.
    pub fn execute(
        &self,
        context: &ConsoleContext,
        line: &str,
    ) -> Result<DispatchOutcome, CommandError> {
        let (name, args) = split_command_line(line);
        let Some(command) = self.get(name) else {
            return Ok(DispatchOutcome::Unknown);
        };
        debug!(
            target: DISPATCH_TARGET,
            command = name,
            args,
            "dispatching command"
        );
        command.execute(&CommandScope::new(context, self), args)?;
        Ok(DispatchOutcome::Executed)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.commands.keys()).finish()
    }
}

/// Splits a line into the command name and the remaining argument text.
///
/// The name is the first whitespace-delimited token; the arguments are the
/// rest of the line with surrounding whitespace removed. No quoting is
/// interpreted.
#[must_use]
pub fn split_command_line(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    }
}
