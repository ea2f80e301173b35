//! Ordered log of invoked actions.

use std::sync::{Arc, Mutex, MutexGuard};

/// Thread-safe, cloneable record of labels in the order they were logged.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Construct an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to the log.
    pub fn record(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// Closure that records `label` when invoked.
    #[must_use]
    pub fn action(&self, label: impl Into<String>) -> impl FnOnce() + Send + 'static {
        let recorder = self.clone();
        let label = label.into();
        move || recorder.record(label)
    }

    /// Copy of every entry logged so far.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of entries logged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().expect("recorder mutex poisoned")
    }
}
