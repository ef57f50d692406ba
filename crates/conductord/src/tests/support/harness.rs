//! Console context wired to recording doubles inside a temporary directory.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use conductor_config::Config;

use crate::context::ConsoleContext;
use crate::lifecycle::LifecycleController;
use crate::reporter::ConsoleReporter;
use crate::settings::SettingsStore;

use super::{RecordingConsoleReporter, RecordingServerHandle};

const HISTORY_SIZE: usize = 16;

/// Builds a launch configuration rooted in `dir` with no prompt delay.
pub fn test_config(dir: &Utf8Path) -> Config {
    Config {
        settings_path: dir.join("settings.json"),
        audit_log_path: dir.join("console.log"),
        prompt_delay_ms: 0,
        ..Config::default()
    }
}

/// Owns a [`ConsoleContext`] whose settings file already exists on disk.
pub struct ContextHarness {
    _dir: TempDir,
    settings_path: Utf8PathBuf,
    handle: RecordingServerHandle,
    reporter: Arc<RecordingConsoleReporter>,
    context: ConsoleContext,
}

impl ContextHarness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        let settings_path = root.join("settings.json");
        let store = SettingsStore::new(settings_path.clone());
        let loaded = store.load().expect("load default settings");
        let handle = RecordingServerHandle::default();
        let controller = Arc::new(LifecycleController::new(
            Arc::new(handle.clone()),
            loaded.settings,
        ));
        let reporter = Arc::new(RecordingConsoleReporter::default());
        let context = ConsoleContext::new(
            controller,
            store,
            Arc::clone(&reporter) as Arc<dyn ConsoleReporter>,
            HISTORY_SIZE,
        );
        Self {
            _dir: dir,
            settings_path,
            handle,
            reporter,
            context,
        }
    }

    pub fn context(&self) -> &ConsoleContext {
        &self.context
    }

    pub fn handle(&self) -> &RecordingServerHandle {
        &self.handle
    }

    pub fn reporter(&self) -> &RecordingConsoleReporter {
        &self.reporter
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }

    pub fn start(&self) {
        self.context
            .controller()
            .start()
            .expect("handle should start");
    }
}
