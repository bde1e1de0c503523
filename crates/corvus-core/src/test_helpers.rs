//! Test support: a substitute engine workload.
//!
//! Any engine stand-in used to exercise termination must expose a
//! check-and-yield point, or cancellation signals would never be observed.
//! [`spawn_worker`] provides that: a tokio task that polls
//! [`ExecContext::is_cancelled`] between short sleeps and finishes its
//! context through the tracker when it unwinds.

use crate::error::EngineError;
use crate::exec::{ExecContext, ExecutionTracker};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// How a worker's unit of work ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOutcome {
    /// Ran all its steps without being signalled
    Completed,
    /// Observed the cancellation flag at a checkpoint and unwound
    Cancelled,
}

/// Begin a context and run a cancellable workload on it.
///
/// With `max_steps = None` the worker runs until cancelled, mimicking an
/// endless transaction. The context is always finished through the tracker,
/// whatever the outcome, just as a real engine removes contexts on success,
/// failure, and cancellation alike.
pub fn spawn_worker(
    tracker: &Arc<ExecutionTracker>,
    max_steps: Option<u32>,
) -> Result<(Arc<ExecContext>, JoinHandle<WorkOutcome>), EngineError> {
    let ctx = tracker.begin()?;
    let tracker = tracker.clone();
    let worker_ctx = ctx.clone();

    let shutdown = tracker.shutdown_signal();
    let join = tokio::spawn(async move {
        let mut steps = 0u32;
        let outcome = loop {
            // The check-and-yield point
            if worker_ctx.is_cancelled() {
                break WorkOutcome::Cancelled;
            }
            if let Some(max) = max_steps {
                if steps >= max {
                    break WorkOutcome::Completed;
                }
            }
            steps += 1;
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(2)) => {}
                _ = shutdown.cancelled() => break WorkOutcome::Cancelled,
            }
        };
        tracker.finish(&worker_ctx);
        outcome
    });

    Ok((ctx, join))
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_for<F>(condition: F, timeout: Duration) -> bool
where
    F: Fn() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    condition()
}
