//! Server handle double counting lifecycle calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::lifecycle::ServerHandle;
use crate::settings::Settings;

#[derive(Debug, Default)]
struct Calls {
    starts: AtomicUsize,
    stops: AtomicUsize,
    applied: Mutex<Vec<Arc<Settings>>>,
}

/// Records calls made by the lifecycle controller. Clones share counters.
#[derive(Debug, Clone, Default)]
pub struct RecordingServerHandle {
    calls: Arc<Calls>,
}

impl RecordingServerHandle {
    pub fn starts(&self) -> usize {
        self.calls.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.calls.stops.load(Ordering::SeqCst)
    }

    /// Every settings document handed over, oldest first.
    pub fn applied(&self) -> Vec<Arc<Settings>> {
        self.calls
            .applied
            .lock()
            .expect("applied settings mutex poisoned")
            .clone()
    }
}

impl ServerHandle for RecordingServerHandle {
    fn start(&self) {
        self.calls.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.calls.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn apply_settings(&self, settings: Arc<Settings>) {
        self.calls
            .applied
            .lock()
            .expect("applied settings mutex poisoned")
            .push(settings);
    }
}
