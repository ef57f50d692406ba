//! Interrupt source triggered by the test itself.

use std::sync::{Arc, Condvar, Mutex};

use crate::process::{ShutdownError, ShutdownSignal};

/// Shutdown signal released by [`TestShutdownSignal::trigger`].
#[derive(Debug, Clone, Default)]
pub struct TestShutdownSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl TestShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        let (lock, condvar) = &*self.inner;
        *lock.lock().expect("shutdown mutex poisoned") = true;
        condvar.notify_all();
    }
}

impl ShutdownSignal for TestShutdownSignal {
    fn wait(&mut self) -> Result<(), ShutdownError> {
        let (lock, condvar) = &*self.inner;
        let mut triggered = lock.lock().expect("shutdown mutex poisoned");
        while !*triggered {
            triggered = condvar.wait(triggered).expect("shutdown mutex poisoned");
        }
        Ok(())
    }
}
