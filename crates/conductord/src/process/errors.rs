//! Defines the unified error surface for console launch.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use ortho_config::OrthoError;

use crate::commands::RegistryError;
use crate::lifecycle::LifecycleError;
use crate::settings::SettingsError;
use crate::telemetry::TelemetryError;

use super::shutdown::ShutdownError;

/// Errors that abort the console before or during start-up.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Launch configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Config {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The settings document could not be loaded.
    #[error("caught error while parsing/reading settings: {source}")]
    Settings {
        /// Underlying settings error.
        #[source]
        source: SettingsError,
    },
    /// A command could not be registered.
    #[error("failed to register console commands: {source}")]
    Registry {
        /// Underlying registry error.
        #[source]
        source: RegistryError,
    },
    /// Installing the interrupt listener failed.
    #[error("failed to install interrupt listener: {source}")]
    Shutdown {
        /// Underlying shutdown error.
        #[source]
        source: ShutdownError,
    },
    /// Starting the server handle failed.
    #[error("failed to start server handle: {source}")]
    Lifecycle {
        /// Underlying lifecycle error.
        #[source]
        source: LifecycleError,
    },
    /// Opening stdin or spawning a helper thread failed.
    #[error("failed to prepare console input: {source}")]
    Input {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl From<Arc<OrthoError>> for LaunchError {
    fn from(source: Arc<OrthoError>) -> Self {
        Self::Config { source }
    }
}

impl From<TelemetryError> for LaunchError {
    fn from(source: TelemetryError) -> Self {
        Self::Telemetry { source }
    }
}

impl From<SettingsError> for LaunchError {
    fn from(source: SettingsError) -> Self {
        Self::Settings { source }
    }
}

impl From<RegistryError> for LaunchError {
    fn from(source: RegistryError) -> Self {
        Self::Registry { source }
    }
}

impl From<ShutdownError> for LaunchError {
    fn from(source: ShutdownError) -> Self {
        Self::Shutdown { source }
    }
}

impl From<LifecycleError> for LaunchError {
    fn from(source: LifecycleError) -> Self {
        Self::Lifecycle { source }
    }
}
