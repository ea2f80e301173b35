//! Callback sequencer handles.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::registry::{Action, Advance, QueueRegistry};

/// Handle bound to one named queue of a [`QueueRegistry`].
///
/// Actions run strictly one at a time in FIFO order. Each action is
/// responsible for calling [`Sequencer::next`] (directly or once its own
/// asynchronous work finishes) to let the following action run; nothing
/// advances the queue otherwise.
///
/// Handles for the same name on the same registry share one queue, so
/// producers can add work through one handle and start it through another.
#[derive(Debug, Clone)]
pub struct Sequencer {
    registry: QueueRegistry,
    name: Arc<str>,
}

impl Sequencer {
    pub(crate) const fn new(registry: QueueRegistry, name: Arc<str>) -> Self {
        Self { registry, name }
    }

    /// Queue name this handle is bound to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry that owns the underlying queue.
    #[must_use]
    pub const fn registry(&self) -> &QueueRegistry {
        &self.registry
    }

    /// Append `action` to the queue without starting it.
    pub fn add<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.registry.push(&self.name, Box::new(action));
    }

    /// Append an optional action; `None` is ignored.
    pub fn add_optional(&self, action: Option<Action>) {
        if let Some(action) = action {
            self.registry.push(&self.name, action);
        }
    }

    /// Begin draining the queue.
    ///
    /// Does nothing when a drain is already in progress or the queue is
    /// empty, so calling it after every `add` is always safe.
    pub fn start(&self) {
        if self.registry.begin(&self.name) {
            debug!(queue = %self.name, "queue drain started");
            self.next();
        }
    }

    /// Run the next queued action, or end the drain if none remain.
    ///
    /// Has no effect unless a drain is in progress. Calling it outside an
    /// action's completion runs the next action immediately, out of order
    /// with respect to the previous action's real work.
    ///
    /// A call made while an action of this queue is still running (for
    /// example from inside the action) does not nest: it is counted, and the
    /// call already running that action performs the advance once the action
    /// returns. Chains of immediately-completing actions therefore run in a
    /// loop at constant stack depth.
    pub fn next(&self) {
        let mut advance = self.registry.advance(&self.name);
        loop {
            match advance {
                Advance::Run(action) => {
                    let _unwind = UnwindGuard {
                        registry: &self.registry,
                        name: &self.name,
                    };
                    action();
                    advance = self.registry.settle(&self.name);
                }
                Advance::Deferred => {
                    trace!(queue = %self.name, "advance deferred to running action");
                    return;
                }
                Advance::Idle => return,
                Advance::Drained => {
                    debug!(queue = %self.name, "queue drained");
                    return;
                }
                Advance::Stray => {
                    self.registry.report_stray(&self.name);
                    return;
                }
            }
        }
    }

    /// Discard every pending action and end the current drain.
    ///
    /// Actions that already started keep running; a later `next()` from one
    /// of them is ignored.
    pub fn clear(&self) {
        self.registry.clear(&self.name);
    }

    /// Number of actions waiting to run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.pending(&self.name)
    }

    /// Whether no actions are waiting to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a drain is currently active for this name.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.registry.in_progress(&self.name)
    }
}

/// Releases the running-action marker if an action unwinds.
struct UnwindGuard<'a> {
    registry: &'a QueueRegistry,
    name: &'a str,
}

impl Drop for UnwindGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.registry.abandon(self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn synchronous_chain_runs_to_completion() {
        let registry = QueueRegistry::new();
        let queue = registry.sequencer("chain");
        let seen = Arc::new(Mutex::new(Vec::new()));

        for step in 0..3 {
            let seen = Arc::clone(&seen);
            let queue_ref = queue.clone();
            queue.add(move || {
                seen.lock().expect("seen lock").push(step);
                queue_ref.next();
            });
        }
        queue.start();

        assert_eq!(*seen.lock().expect("seen lock"), vec![0, 1, 2]);
        assert!(!queue.is_in_progress());
        assert!(queue.is_empty());
    }

    #[test]
    fn add_optional_skips_none() {
        let registry = QueueRegistry::new();
        let queue = registry.sequencer("optional");
        queue.add_optional(None);
        assert_eq!(queue.len(), 0);

        queue.add_optional(Some(Box::new(|| {})));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.name(), "optional");
    }

    #[test]
    fn action_may_clear_its_own_queue() {
        let registry = QueueRegistry::new();
        let queue = registry.sequencer("self-clear");
        let queue_ref = queue.clone();
        queue.add(move || queue_ref.clear());
        queue.add(|| panic!("cleared action must not run"));

        queue.start();
        assert!(queue.is_empty());
        assert!(!queue.is_in_progress());
        queue.next();
    }
}
