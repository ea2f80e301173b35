//! Shared state behind callback sequencers.
//!
//! # Design
//! - One pending queue and one in-progress flag per name, created lazily.
//! - The lock is never held while an action runs or a discarded action drops,
//!   so actions may call back into any handle synchronously.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::sequencer::Sequencer;

/// Deferred unit of work queued under a name.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// How a `next()` call that arrives while nothing is draining gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrayNextPolicy {
    /// Record the stray signal at `trace` level only.
    #[default]
    Ignore,
    /// Record the stray signal at `warn` level.
    Warn,
}

impl StrayNextPolicy {
    /// Render the policy as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Warn => "warn",
        }
    }
}

impl FromStr for StrayNextPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            other => Err(format!("invalid stray next policy '{other}'")),
        }
    }
}

/// Point-in-time view of a single named queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    /// Queue name.
    pub name: String,
    /// Number of actions waiting to run.
    pub pending: usize,
    /// Whether a drain loop is active.
    pub in_progress: bool,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<Action>,
    in_progress: bool,
    /// A `next()` call is currently running an action for this name.
    advancing: bool,
    /// `next()` calls that arrived while `advancing` was set.
    deferred: usize,
}

impl QueueState {
    fn pop_front(&mut self) -> Advance {
        if let Some(action) = self.pending.pop_front() {
            self.advancing = true;
            return Advance::Run(action);
        }
        self.in_progress = false;
        self.advancing = false;
        self.deferred = 0;
        Advance::Drained
    }
}

/// Outcome of asking a queue for its next action.
pub(crate) enum Advance {
    /// The front action was dequeued and should be invoked.
    Run(Action),
    /// Another `next()` is running an action; it will perform this advance
    /// once that action returns.
    Deferred,
    /// The running action returned without asking for an advance.
    Idle,
    /// The queue was empty; the drain loop has ended.
    Drained,
    /// No drain loop was active.
    Stray,
}

struct RegistryInner {
    queues: Mutex<HashMap<String, QueueState>>,
    stray_next: StrayNextPolicy,
}

/// Registry of named queues shared by every [`Sequencer`] it hands out.
///
/// Cloning the registry is cheap and yields another view of the same queues,
/// so it can be injected wherever UI steps are coordinated.
#[derive(Clone)]
pub struct QueueRegistry {
    inner: Arc<RegistryInner>,
}

impl Default for QueueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueueRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("QueueRegistry")
            .field("stray_next", &self.inner.stray_next)
            .finish_non_exhaustive()
    }
}

impl QueueRegistry {
    /// Construct an empty registry that ignores stray `next()` calls.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(StrayNextPolicy::default())
    }

    /// Construct an empty registry with the given stray-signal policy.
    #[must_use]
    pub fn with_policy(stray_next: StrayNextPolicy) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                queues: Mutex::new(HashMap::new()),
                stray_next,
            }),
        }
    }

    /// Policy applied to stray `next()` calls.
    #[must_use]
    pub fn stray_next_policy(&self) -> StrayNextPolicy {
        self.inner.stray_next
    }

    /// Return a handle bound to `name`, creating the queue if needed.
    ///
    /// # Panics
    ///
    /// Panics if the registry mutex has been poisoned.
    #[must_use]
    pub fn sequencer(&self, name: impl Into<String>) -> Sequencer {
        let name = name.into();
        self.lock().entry(name.clone()).or_default();
        Sequencer::new(self.clone(), name.into())
    }

    /// Names of every queue created so far, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the registry mutex has been poisoned.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot every queue, sorted by name.
    ///
    /// # Panics
    ///
    /// Panics if the registry mutex has been poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Vec<QueueSnapshot> {
        let mut snapshot: Vec<QueueSnapshot> = self
            .lock()
            .iter()
            .map(|(name, state)| QueueSnapshot {
                name: name.clone(),
                pending: state.pending.len(),
                in_progress: state.in_progress,
            })
            .collect();
        snapshot.sort_by(|left, right| left.name.cmp(&right.name));
        snapshot
    }

    pub(crate) fn push(&self, name: &str, action: Action) {
        let depth = {
            let mut queues = self.lock();
            let state = queues.entry(name.to_string()).or_default();
            state.pending.push_back(action);
            state.pending.len()
        };
        trace!(queue = name, depth, "action queued");
    }

    /// Flip the queue into draining mode when it is idle and non-empty.
    pub(crate) fn begin(&self, name: &str) -> bool {
        let mut queues = self.lock();
        let state = queues.entry(name.to_string()).or_default();
        if state.in_progress || state.pending.is_empty() {
            return false;
        }
        state.in_progress = true;
        true
    }

    /// Handle a `next()` call. While another call is running an action for
    /// the same name the advance is only counted, so chains of actions that
    /// complete immediately never nest.
    pub(crate) fn advance(&self, name: &str) -> Advance {
        let mut queues = self.lock();
        let state = queues.entry(name.to_string()).or_default();
        if !state.in_progress {
            return Advance::Stray;
        }
        if state.advancing {
            state.deferred += 1;
            return Advance::Deferred;
        }
        state.pop_front()
    }

    /// Called once an action handed out by [`Self::advance`] or
    /// [`Self::settle`] has returned. Performs one counted advance, if any.
    pub(crate) fn settle(&self, name: &str) -> Advance {
        let mut queues = self.lock();
        let state = queues.entry(name.to_string()).or_default();
        if !state.in_progress || state.deferred == 0 {
            state.advancing = false;
            state.deferred = 0;
            return Advance::Idle;
        }
        state.deferred -= 1;
        state.pop_front()
    }

    /// Forget the running action after it panicked so later `next()` calls
    /// run actions again.
    pub(crate) fn abandon(&self, name: &str) {
        if let Some(state) = self.lock().get_mut(name) {
            state.advancing = false;
            state.deferred = 0;
        }
    }

    /// Drop every pending action and end any drain loop. Returns the number
    /// of discarded actions.
    pub(crate) fn clear(&self, name: &str) -> usize {
        let discarded = {
            let mut queues = self.lock();
            let state = queues.entry(name.to_string()).or_default();
            state.in_progress = false;
            state.deferred = 0;
            std::mem::take(&mut state.pending)
        };
        let count = discarded.len();
        drop(discarded);
        debug!(queue = name, discarded = count, "queue cleared");
        count
    }

    pub(crate) fn pending(&self, name: &str) -> usize {
        self.lock().get(name).map_or(0, |state| state.pending.len())
    }

    pub(crate) fn in_progress(&self, name: &str) -> bool {
        self.lock().get(name).is_some_and(|state| state.in_progress)
    }

    pub(crate) fn report_stray(&self, name: &str) {
        match self.inner.stray_next {
            StrayNextPolicy::Ignore => {
                trace!(queue = name, "next() ignored; queue is not draining");
            }
            StrayNextPolicy::Warn => {
                warn!(queue = name, "next() ignored; queue is not draining");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, QueueState>> {
        self.inner
            .queues
            .lock()
            .expect("queue registry mutex poisoned")
    }
}
