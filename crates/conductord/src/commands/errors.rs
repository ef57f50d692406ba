//! Error types for command registration and execution.

use thiserror::Error;

use crate::settings::SettingsError;

/// Errors raised while building a [`super::CommandRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A command with the same name is already registered.
    #[error("command '{name}' is already registered")]
    Duplicate {
        /// Conflicting command name.
        name: String,
    },
    /// Command names must be a single non-empty token.
    #[error("invalid command name '{name}'")]
    InvalidName {
        /// Rejected name.
        name: String,
    },
}

/// Failures signalled by command executors.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading or writing the settings document failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The argument text did not match what the command accepts.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        /// Description of the problem.
        message: String,
    },
    /// Any other executor failure.
    #[error("{message}")]
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl CommandError {
    /// Builds an [`CommandError::InvalidArguments`] error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Builds a [`CommandError::Failed`] error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}
