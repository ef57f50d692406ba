//! Failures raised while reading, parsing, or persisting the settings document.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by [`super::SettingsStore`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings '{path}': {source}")]
    Read {
        /// Settings file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The settings file is not valid JSON.
    #[error("failed to parse settings '{path}': {source}")]
    Parse {
        /// Settings file path.
        path: Utf8PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The settings file parsed but its top level is not an object.
    #[error("settings '{path}' must contain a JSON object, found {found}")]
    NotAnObject {
        /// Settings file path.
        path: Utf8PathBuf,
        /// Kind of JSON value found at the top level.
        found: &'static str,
    },
    /// Serialising the in-memory document failed.
    #[error("failed to serialise settings: {source}")]
    Serialise {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the document to disk failed.
    #[error("failed to write settings '{path}': {source}")]
    Write {
        /// Destination that could not be written.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    /// Returns true when the failure came from malformed file content rather
    /// than from the filesystem.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::NotAnObject { .. })
    }
}
