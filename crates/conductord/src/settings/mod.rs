//! Settings document persistence.
//!
//! The settings document is an opaque JSON object owned by the server handle.
//! The console only ever loads it, replaces it wholesale, or writes it back.
//! Start-up loading fails fast on malformed content; runtime reloads report
//! the failure and leave the active document untouched.

mod defaults;
mod errors;

use std::fs;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, info};

pub use errors::SettingsError;

pub(crate) const SETTINGS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::settings");

const INDENT: &[u8] = b"    ";

/// Schema-free settings document. Key order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    /// Wraps an existing JSON object.
    #[must_use]
    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// The immutable document used when no settings file exists yet.
    #[must_use]
    pub fn builtin_default() -> Self {
        Self(defaults::builtin_document())
    }

    /// Looks up a top-level entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Renders the document as four-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Serialise`] if a value cannot be encoded.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, SettingsError> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        self.0
            .serialize(&mut serializer)
            .map_err(|source| SettingsError::Serialise { source })?;
        Ok(buffer)
    }

    fn parse(path: &Utf8Path, text: &str) -> Result<Self, SettingsError> {
        let value: Value = serde_json::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(SettingsError::NotAnObject {
                path: path.to_path_buf(),
                found: json_kind(&other),
            }),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOrigin {
    /// Parsed from the existing settings file.
    File,
    /// Synthesised from [`Settings::builtin_default`] and persisted.
    BuiltinDefault,
}

/// Result of the start-up load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    /// The active document.
    pub settings: Settings,
    /// How the document was obtained.
    pub origin: SettingsOrigin,
}

/// Reads and writes the settings document at a fixed location.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Utf8PathBuf,
}

impl SettingsStore {
    /// Builds a store bound to `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings document.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }

    /// Loads the document at start-up.
    ///
    /// A missing file is replaced by the built-in default, which is persisted
    /// before being returned.
    ///
    /// # Errors
    ///
    /// Malformed content and filesystem failures are returned to the caller,
    /// which must treat them as fatal.
    pub fn load(&self) -> Result<LoadedSettings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let settings = Settings::parse(&self.path, &text)?;
                info!(
                    target: SETTINGS_TARGET,
                    file = %self.path,
                    entries = settings.len(),
                    "settings loaded"
                );
                Ok(LoadedSettings {
                    settings,
                    origin: SettingsOrigin::File,
                })
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                let settings = Settings::builtin_default();
                self.save(&settings)?;
                info!(
                    target: SETTINGS_TARGET,
                    file = %self.path,
                    "settings file missing; wrote built-in defaults"
                );
                Ok(LoadedSettings {
                    settings,
                    origin: SettingsOrigin::BuiltinDefault,
                })
            }
            Err(source) => Err(SettingsError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Re-reads the document at runtime.
    ///
    /// Unlike [`Self::load`] a missing file is an error; the caller keeps its
    /// current document whenever this fails.
    ///
    /// # Errors
    ///
    /// Returns the read or parse failure.
    pub fn reload(&self) -> Result<Settings, SettingsError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        let settings = Settings::parse(&self.path, &text)?;
        debug!(
            target: SETTINGS_TARGET,
            file = %self.path,
            entries = settings.len(),
            "settings reloaded"
        );
        Ok(settings)
    }

    /// Writes `settings` over the existing file.
    ///
    /// The document is staged next to the destination and renamed into place
    /// so readers never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns serialisation or filesystem failures.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let data = settings.to_pretty_json()?;
        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }
        let staging = self.staging_path();
        write_all(&staging, &data).map_err(|source| SettingsError::Write {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| self.write_error(source))?;
        debug!(
            target: SETTINGS_TARGET,
            file = %self.path,
            bytes = data.len(),
            "settings saved"
        );
        Ok(())
    }

    fn staging_path(&self) -> Utf8PathBuf {
        let name = self.path.file_name().unwrap_or("settings");
        self.path.with_file_name(format!("{name}.tmp"))
    }

    fn write_error(&self, source: io::Error) -> SettingsError {
        SettingsError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_all(path: &Utf8Path, data: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
