//! Async lanes: named FIFO drains for step futures.
//!
//! # Design
//! - One Tokio drain task per lane name, spawned lazily on first use.
//! - Each step receives a [`Completion`]; the drain waits for that signal (or
//!   for the token to be dropped) before starting the next step.
//! - `clear` bumps an epoch; steps enqueued under an older epoch are skipped
//!   when the drain reaches them.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{Instrument, debug, info_span, trace};

use crate::error::{SequencerError, SequencerResult};

type StepFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
type Step = Box<dyn FnOnce(Completion) -> StepFuture + Send + 'static>;

struct Queued {
    epoch: u64,
    step: Step,
}

#[derive(Debug, Default)]
struct Counters {
    epoch: u64,
    pending: usize,
}

#[derive(Clone)]
struct LaneEntry {
    sender: mpsc::UnboundedSender<Queued>,
    counters: Arc<Mutex<Counters>>,
}

/// Signal handed to each lane step; the lane advances once it is consumed.
#[derive(Debug)]
pub struct Completion {
    sender: oneshot::Sender<()>,
}

impl Completion {
    /// Mark the step as finished so the lane can start the next one.
    pub fn complete(self) {
        let _ = self.sender.send(());
    }
}

/// Registry of async lanes keyed by name.
#[derive(Clone, Default)]
pub struct LaneRegistry {
    lanes: Arc<Mutex<HashMap<String, LaneEntry>>>,
}

impl fmt::Debug for LaneRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LaneRegistry")
            .field("lanes", &self.lock().len())
            .finish()
    }
}

impl LaneRegistry {
    /// Construct an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a handle for `name`, spawning its drain task on first use.
    ///
    /// A lane whose drain task has stopped is replaced by a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::NoRuntime`] when called outside a Tokio
    /// runtime and the lane does not exist yet.
    ///
    /// # Panics
    ///
    /// Panics if the registry mutex has been poisoned.
    pub fn lane(&self, name: impl Into<String>) -> SequencerResult<Lane> {
        let name = name.into();
        let mut lanes = self.lock();
        if let Some(entry) = lanes.get(&name).filter(|entry| !entry.sender.is_closed()) {
            return Ok(Lane {
                name: name.as_str().into(),
                entry: entry.clone(),
            });
        }

        let runtime = Handle::try_current().map_err(|source| SequencerError::NoRuntime {
            name: name.clone(),
            source,
        })?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let entry = LaneEntry {
            sender,
            counters: Arc::new(Mutex::new(Counters::default())),
        };
        let lane_name: Arc<str> = name.as_str().into();
        runtime.spawn(
            drain(
                Arc::clone(&lane_name),
                receiver,
                Arc::clone(&entry.counters),
            )
            .instrument(info_span!("lane", name = %lane_name)),
        );
        lanes.insert(name, entry.clone());
        Ok(Lane {
            name: lane_name,
            entry,
        })
    }

    /// Names of every lane created so far, sorted.
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

    fn lock(&self) -> MutexGuard<'_, HashMap<String, LaneEntry>> {
        self.lanes.lock().expect("lane registry mutex poisoned")
    }
}

/// Handle to a named async lane.
#[derive(Clone)]
pub struct Lane {
    name: Arc<str>,
    entry: LaneEntry,
}

impl fmt::Debug for Lane {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Lane")
            .field("name", &self.name)
            .field("pending", &self.pending())
            .finish()
    }
}

impl Lane {
    /// Lane name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue `step` behind every step already enqueued on this lane.
    ///
    /// The step is called with a [`Completion`] once its turn comes; its
    /// future runs as its own task and the lane waits for the completion
    /// signal, not for the future, before moving on. Dropping the token
    /// without signalling also advances the lane.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::LaneClosed`] if the drain task has stopped.
    ///
    /// # Panics
    ///
    /// Panics if the lane counters mutex has been poisoned.
    pub fn enqueue<F, Fut>(&self, step: F) -> SequencerResult<()>
    where
        F: FnOnce(Completion) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let step: Step = Box::new(move |done| Box::pin(step(done)));
        let mut counters = self.counters();
        self.entry
            .sender
            .send(Queued {
                epoch: counters.epoch,
                step,
            })
            .map_err(|_| SequencerError::LaneClosed {
                name: self.name.to_string(),
            })?;
        counters.pending += 1;
        trace!(lane = %self.name, pending = counters.pending, "step queued");
        Ok(())
    }

    /// Queue a step that completes after `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::LaneClosed`] if the drain task has stopped.
    pub fn delay(&self, duration: Duration) -> SequencerResult<()> {
        self.enqueue(move |done| async move {
            tokio::time::sleep(duration).await;
            done.complete();
        })
    }

    /// Wait until every step enqueued before this call has completed.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::StepDiscarded`] when the lane is cleared
    /// before the wait finishes, or [`SequencerError::LaneClosed`] if the
    /// drain task has stopped.
    pub async fn idle(&self) -> SequencerResult<()> {
        let (reached, waiter) = oneshot::channel();
        self.enqueue(move |done| async move {
            let _ = reached.send(());
            done.complete();
        })?;
        waiter.await.map_err(|_| SequencerError::StepDiscarded {
            name: self.name.to_string(),
        })
    }

    /// Discard every step that has not started yet. The running step, if
    /// any, is unaffected. Returns the number of discarded steps.
    ///
    /// # Panics
    ///
    /// Panics if the lane counters mutex has been poisoned.
    pub fn clear(&self) -> usize {
        let mut counters = self.counters();
        let discarded = counters.pending;
        counters.epoch += 1;
        counters.pending = 0;
        drop(counters);
        debug!(lane = %self.name, discarded, "lane cleared");
        discarded
    }

    /// Number of steps enqueued and not yet started.
    ///
    /// # Panics
    ///
    /// Panics if the lane counters mutex has been poisoned.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.counters().pending
    }

    fn counters(&self) -> MutexGuard<'_, Counters> {
        self.entry
            .counters
            .lock()
            .expect("lane counters mutex poisoned")
    }
}

async fn drain(
    name: Arc<str>,
    mut receiver: mpsc::UnboundedReceiver<Queued>,
    counters: Arc<Mutex<Counters>>,
) {
    debug!("lane drain started");
    while let Some(queued) = receiver.recv().await {
        let current = {
            let mut counters = counters.lock().expect("lane counters mutex poisoned");
            let current = queued.epoch == counters.epoch;
            if current {
                counters.pending = counters.pending.saturating_sub(1);
            }
            current
        };
        if !current {
            trace!("skipping step discarded by clear");
            continue;
        }

        let (sender, signal) = oneshot::channel();
        let future = (queued.step)(Completion { sender });
        tokio::spawn(future.instrument(info_span!("lane_step", lane = %name)));
        if signal.await.is_err() {
            debug!("step dropped its completion without signalling");
        }
    }
    debug!("lane drain stopped");
}
