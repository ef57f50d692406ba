//! Sequences console start-up, the session, and shutdown.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{info, warn};

use conductor_config::Config;

use crate::audit::AuditLog;
use crate::bootstrap::{ConfigLoader, SystemConfigLoader};
use crate::commands::{CommandRegistry, ConsoleCommand, builtin_commands};
use crate::context::ConsoleContext;
use crate::lifecycle::{HeadlessServer, LifecycleController, ServerHandle};
use crate::reporter::{ConsoleReporter, StructuredConsoleReporter};
use crate::session::{InteractiveSession, LineSource, SessionEnd, TerminalLineSource};
use crate::settings::{SettingsOrigin, SettingsStore};
use crate::telemetry;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal, spawn_interrupt_listener};

/// Terminal collaborators: where lines come from and where the prompt goes.
pub(crate) struct TerminalIo<S, W> {
    pub(crate) input: S,
    pub(crate) prompt: W,
}

/// Collaborators required to run the console.
pub(crate) struct LaunchPlan<S, W, I> {
    pub(crate) config: Config,
    pub(crate) handle: Arc<dyn ServerHandle>,
    pub(crate) reporter: Arc<dyn ConsoleReporter>,
    pub(crate) terminal: TerminalIo<S, W>,
    pub(crate) interrupt: I,
    pub(crate) commands: Vec<Box<dyn ConsoleCommand>>,
}

/// Runs the console with the production collaborators.
///
/// # Errors
///
/// Returns [`LaunchError`] when configuration, telemetry, the settings
/// document, or the terminal cannot be prepared.
pub fn run_console() -> Result<(), LaunchError> {
    run_console_with_loader(&SystemConfigLoader, Vec::new())
}

/// Runs the console with a custom configuration loader and extra domain
/// commands registered after the built-ins.
///
/// # Errors
///
/// See [`run_console`].
pub fn run_console_with_loader(
    loader: &dyn ConfigLoader,
    commands: Vec<Box<dyn ConsoleCommand>>,
) -> Result<(), LaunchError> {
    let config = loader.load()?;
    telemetry::initialise(&config)?;
    let reporter = Arc::new(StructuredConsoleReporter::new(AuditLog::new(
        config.audit_log_path(),
    )));
    let input = TerminalLineSource::spawn(config.history_size())
        .map_err(|source| LaunchError::Input { source })?;
    let interrupt = SystemShutdownSignal::install()?;
    let plan = LaunchPlan {
        config,
        handle: Arc::new(HeadlessServer::new()),
        reporter,
        terminal: TerminalIo {
            input,
            // The line editor draws the prompt itself.
            prompt: io::sink(),
        },
        interrupt,
        commands,
    };
    run_console_with(plan)
}

/// Runs the console with injected collaborators.
pub(crate) fn run_console_with<S, W, I>(plan: LaunchPlan<S, W, I>) -> Result<(), LaunchError>
where
    S: LineSource,
    W: Write,
    I: ShutdownSignal,
{
    let LaunchPlan {
        config,
        handle,
        reporter,
        terminal,
        interrupt,
        commands,
    } = plan;

    let store = SettingsStore::new(config.settings_path());
    let loaded = store.load()?;
    if loaded.origin == SettingsOrigin::BuiltinDefault {
        reporter.inform(&format!(
            "using default settings - {} wasn't detected",
            store.path()
        ));
    }

    let controller = Arc::new(LifecycleController::new(handle, loaded.settings));
    let context = ConsoleContext::new(
        Arc::clone(&controller),
        store,
        reporter,
        config.history_size(),
    );

    let mut registry = CommandRegistry::new();
    registry.register_all(builtin_commands())?;
    registry.register_all(commands)?;

    let mut session = InteractiveSession::new(
        context.clone(),
        registry,
        terminal.input,
        terminal.prompt,
        config.prompt_delay(),
    );
    controller.start()?;
    // Interrupts delivered before this point stay queued on the signal source.
    if let Err(error) = spawn_interrupt_listener(interrupt, context.clone()) {
        controller.stop();
        return Err(error.into());
    }
    info!(
        target: PROCESS_TARGET,
        settings = %context.store().path(),
        commands = session.registry().len(),
        "console ready"
    );

    match session.run() {
        Ok(SessionEnd::Closed) => {}
        Ok(SessionEnd::EndOfInput) => {
            context.reporter().inform("command stream closed");
        }
        Err(error) => {
            warn!(target: PROCESS_TARGET, %error, "command stream failed");
        }
    }

    controller.wait_until_stopped();
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
