//! Launch configuration for the conductor operator console.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, then an optional
//! configuration file, then `CONDUCTOR_*` environment variables, then CLI
//! flags. This configuration only describes how the console itself runs. The
//! settings document handed to the server handle lives in its own JSON file
//! whose location is [`Config::settings_path`].

mod defaults;
mod logging;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_AUDIT_LOG_PATH, DEFAULT_HISTORY_SIZE, DEFAULT_LOG_FILTER, DEFAULT_PROMPT_DELAY_MS,
    DEFAULT_SETTINGS_PATH, default_audit_log_path, default_log_filter_string, default_log_format,
    default_settings_path,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved launch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CONDUCTOR")]
pub struct Config {
    /// Location of the settings document.
    #[serde(default = "defaults::default_settings_path")]
    pub settings_path: Utf8PathBuf,
    /// File receiving the operator input audit trail.
    #[serde(default = "defaults::default_audit_log_path")]
    pub audit_log_path: Utf8PathBuf,
    /// `tracing` filter expression.
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Output format of the diagnostic log.
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
    /// Grace period before the first prompt, in milliseconds.
    #[serde(default = "defaults::default_prompt_delay_ms")]
    pub prompt_delay_ms: u64,
    /// Capacity of the in-memory command history.
    #[serde(default = "defaults::default_history_size")]
    pub history_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            audit_log_path: default_audit_log_path(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            prompt_delay_ms: DEFAULT_PROMPT_DELAY_MS,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

impl Config {
    /// Location of the settings document.
    #[must_use]
    pub fn settings_path(&self) -> &Utf8Path {
        self.settings_path.as_path()
    }

    /// Location of the operator audit log.
    #[must_use]
    pub fn audit_log_path(&self) -> &Utf8Path {
        self.audit_log_path.as_path()
    }

    /// Filter expression for the diagnostic log.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for the diagnostic log.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Grace period before the first prompt is shown.
    #[must_use]
    pub const fn prompt_delay(&self) -> Duration {
        Duration::from_millis(self.prompt_delay_ms)
    }

    /// Capacity of the in-memory command history.
    #[must_use]
    pub const fn history_size(&self) -> usize {
        self.history_size
    }
}
