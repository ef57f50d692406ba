//! Commands every console ships with.

use super::errors::CommandError;
use super::{CommandScope, ConsoleCommand};

/// The built-in commands in listing order.
#[must_use]
pub fn builtin_commands() -> Vec<Box<dyn ConsoleCommand>> {
    vec![
        Box::new(HelpCommand),
        Box::new(HistoryCommand),
        Box::new(ReloadCommand),
        Box::new(SaveCommand),
        Box::new(ExitCommand),
    ]
}

/// `exit`: stops the handle and closes the command stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExitCommand;

impl ConsoleCommand for ExitCommand {
    fn name(&self) -> &str {
        "exit"
    }

    fn description(&self) -> &str {
        "stop the handle and close the command stream"
    }

    fn execute(&self, scope: &CommandScope<'_>, _args: &str) -> Result<(), CommandError> {
        scope.context().request_exit();
        Ok(())
    }
}

/// `reload`: re-reads the settings file, keeping the active settings when
/// the file cannot be used.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReloadCommand;

impl ConsoleCommand for ReloadCommand {
    fn name(&self) -> &str {
        "reload"
    }

    fn description(&self) -> &str {
        "reload the settings from the settings file"
    }

    fn execute(&self, scope: &CommandScope<'_>, _args: &str) -> Result<(), CommandError> {
        let context = scope.context();
        match context.reload_settings() {
            Ok(()) => context.reporter().print("done"),
            Err(error) => context.reporter().warn(&format!(
                "caught error while reloading {}: {error}",
                context.store().path()
            )),
        }
        Ok(())
    }
}

/// `save`: writes the active settings to the settings file.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaveCommand;

impl ConsoleCommand for SaveCommand {
    fn name(&self) -> &str {
        "save"
    }

    fn description(&self) -> &str {
        "save the current settings to the settings file"
    }

    fn execute(&self, scope: &CommandScope<'_>, _args: &str) -> Result<(), CommandError> {
        scope.context().save_settings()?;
        scope.context().reporter().print("done");
        Ok(())
    }
}

/// `help`: lists registered commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelpCommand;

impl ConsoleCommand for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "list the available commands"
    }

    fn execute(&self, scope: &CommandScope<'_>, _args: &str) -> Result<(), CommandError> {
        let reporter = scope.context().reporter();
        for command in scope.registry().iter() {
            let line = if command.args().is_empty() {
                format!("{} - {}", command.name(), command.description())
            } else {
                format!(
                    "{} {} - {}",
                    command.name(),
                    command.args(),
                    command.description()
                )
            };
            reporter.print(&line);
        }
        Ok(())
    }
}

/// `history [count]`: lists recent input, oldest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct HistoryCommand;

impl ConsoleCommand for HistoryCommand {
    fn name(&self) -> &str {
        "history"
    }

    fn args(&self) -> &str {
        "[count]"
    }

    fn description(&self) -> &str {
        "list recently entered commands"
    }

    fn execute(&self, scope: &CommandScope<'_>, args: &str) -> Result<(), CommandError> {
        let count = if args.is_empty() {
            usize::MAX
        } else {
            args.parse::<usize>().map_err(|error| {
                CommandError::invalid_arguments(format!("count '{args}': {error}"))
            })?
        };
        let reporter = scope.context().reporter();
        for line in scope.context().recent_history(count) {
            reporter.print(&line);
        }
        Ok(())
    }
}
