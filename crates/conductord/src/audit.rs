//! Append-only audit trail of operator input.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Marker distinguishing operator input from regular log output. The prompt
/// uses the same marker.
pub const INPUT_MARKER: &str = "@";

/// Lazily opened audit file. Each entry is `<timestamp> @ <line>`.
#[derive(Debug)]
pub struct AuditLog {
    path: Utf8PathBuf,
    file: Mutex<Option<File>>,
}

impl AuditLog {
    /// Binds the log to `path`; nothing is created until the first entry.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    /// Location of the audit file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }

    /// Appends one operator line.
    ///
    /// # Errors
    ///
    /// Returns filesystem or timestamp formatting failures.
    pub fn record(&self, line: &str) -> io::Result<()> {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(io::Error::other)?;
        let mut slot = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let file = match slot.take() {
            Some(file) => file,
            None => self.open()?,
        };
        let file = slot.insert(file);
        writeln!(file, "{timestamp} {INPUT_MARKER} {line}")?;
        file.flush()
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn appends_marked_lines_in_order() {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("logs/console.log"))
            .expect("temp path should be UTF-8");
        let log = AuditLog::new(path.clone());

        log.record("save").expect("first entry");
        log.record("reload").expect("second entry");

        let content = fs::read_to_string(&path).expect("read audit log");
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" @ save"), "{content}");
        assert!(lines[1].ends_with(" @ reload"), "{content}");
    }

    #[rstest]
    fn nothing_is_created_before_first_entry() {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("console.log"))
            .expect("temp path should be UTF-8");

        let _log = AuditLog::new(path.clone());

        assert!(!path.exists());
    }
}
