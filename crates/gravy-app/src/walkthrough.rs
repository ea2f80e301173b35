//! Sequencing scenarios run by the binary.
//!
//! `upload` drives a callback queue whose actions finish on a timer and
//! signal `next` from a spawned task. `fade` drives an async lane with
//! explicit delays between steps.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::toolkit::Toolkit;

/// Queue name used by [`upload`].
pub const UPLOAD_QUEUE: &str = "upload";
/// Steps run by [`upload`], in order.
pub const UPLOAD_STEPS: [&str; 3] = ["validate", "transfer", "confirm"];
/// Lane name used by [`fade`].
pub const FADE_LANE: &str = "fade";
/// Steps run by [`fade`], in order.
pub const FADE_STEPS: [&str; 3] = ["fade-out", "swap-content", "fade-in"];

/// Run the upload steps one at a time, each taking `step_time`, and return
/// the labels in the order they started.
///
/// # Errors
///
/// Returns [`AppError::Interrupted`] if the queue is cleared before the final
/// step runs.
pub async fn upload(toolkit: &Toolkit, step_time: Duration) -> AppResult<Vec<String>> {
    let queue = toolkit.sequencer(UPLOAD_QUEUE);
    let (started, mut labels) = mpsc::unbounded_channel();

    for label in UPLOAD_STEPS {
        let handle = queue.clone();
        let started = started.clone();
        queue.add(move || {
            info!(step = label, "upload step started");
            let _ = started.send(label.to_string());
            tokio::spawn(async move {
                tokio::time::sleep(step_time).await;
                handle.next();
            });
        });
    }

    let (finished, waiter) = oneshot::channel();
    let handle = queue.clone();
    queue.add(move || {
        let _ = finished.send(());
        handle.next();
    });

    queue.start();
    waiter.await.map_err(|_| AppError::Interrupted {
        queue: queue.name().to_string(),
    })?;

    drop(started);
    Ok(collect(&mut labels))
}

/// Run the fade steps on an async lane with `gap` between them and return
/// the labels in the order they ran.
///
/// # Errors
///
/// Returns [`AppError::Sequencer`] if the lane cannot be created, has
/// stopped, or is cleared while waiting.
pub async fn fade(toolkit: &Toolkit, gap: Duration) -> AppResult<Vec<String>> {
    let lane = toolkit.lane(FADE_LANE)?;
    let (ran, mut labels) = mpsc::unbounded_channel();

    for label in FADE_STEPS {
        let ran = ran.clone();
        lane.enqueue(move |done| async move {
            info!(step = label, "fade step started");
            let _ = ran.send(label.to_string());
            done.complete();
        })
        .map_err(|err| AppError::sequencer("lane.enqueue", err))?;
        lane.delay(gap)
            .map_err(|err| AppError::sequencer("lane.delay", err))?;
    }

    lane.idle()
        .await
        .map_err(|err| AppError::sequencer("lane.idle", err))?;

    drop(ran);
    Ok(collect(&mut labels))
}

fn collect(labels: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut collected = Vec::new();
    while let Ok(label) = labels.try_recv() {
        collected.push(label);
    }
    collected
}
