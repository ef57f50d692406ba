use rustyline::history::{History, MemHistory};
use tracing::debug;

use super::SESSION_TARGET;

/// Accepted input lines for the current session, oldest first.
///
/// Backed by the line editor's in-memory history with the same limits the
/// terminal uses: at most `capacity` entries, and a line equal to the newest
/// entry is not stored twice. Nothing is persisted.
pub struct CommandHistory {
    capacity: usize,
    entries: MemHistory,
}

impl CommandHistory {
    /// Builds an empty history retaining at most `capacity` lines.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut entries = MemHistory::new();
        if let Err(error) = entries
            .set_max_len(capacity)
            .and_then(|()| entries.ignore_dups(true))
        {
            debug!(target: SESSION_TARGET, %error, "history limits rejected");
        }
        Self { capacity, entries }
    }

    /// Records `line`, evicting the oldest entry when full.
    pub fn push(&mut self, line: &str) {
        if let Err(error) = self.entries.add(line) {
            debug!(target: SESSION_TARGET, %error, "history entry dropped");
        }
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        (0..self.entries.len()).map(move |index| self.entries[index].as_str())
    }

    /// The newest `count` entries, oldest first.
    #[must_use]
    pub fn latest(&self, count: usize) -> Vec<String> {
        let skip = self.entries.len().saturating_sub(count);
        (skip..self.entries.len())
            .map(|index| self.entries[index].clone())
            .collect()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Debug for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHistory")
            .field("capacity", &self.capacity)
            .field("len", &self.entries.len())
            .finish()
    }
}
