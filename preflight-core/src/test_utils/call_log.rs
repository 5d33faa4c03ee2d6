//! CallLog: records named calls from components and hooks.

use std::sync::{Arc, Mutex};

/// A thread-safe, cloneable list of recorded calls.
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call.
    pub fn record(&self, name: impl Into<String>) {
        self.calls.lock().unwrap().push(name.into());
    }

    /// How many times `name` was recorded.
    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    /// A snapshot of all recorded calls, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls that start with `prefix`, in order.
    pub fn calls_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }
}
