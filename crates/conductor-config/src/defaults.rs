use camino::Utf8PathBuf;

/// Settings document consumed by the server handle, relative to the working
/// directory.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// File receiving the operator input audit trail.
pub const DEFAULT_AUDIT_LOG_PATH: &str = "console.log";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Delay before the first prompt so start-up logging settles.
pub const DEFAULT_PROMPT_DELAY_MS: u64 = 1_000;

/// Number of accepted lines retained by the session history.
pub const DEFAULT_HISTORY_SIZE: usize = 64;

/// Default settings document location.
pub fn default_settings_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_SETTINGS_PATH)
}

/// Default audit log location.
pub fn default_audit_log_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_AUDIT_LOG_PATH)
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}

pub(crate) const fn default_prompt_delay_ms() -> u64 {
    DEFAULT_PROMPT_DELAY_MS
}

pub(crate) const fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}
