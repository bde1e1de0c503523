//! Execution context: one unit of engine-level work.

use chrono::{DateTime, Utc};
use corvus_commons::ContextId;
use std::sync::atomic::{AtomicBool, Ordering};

/// One unit of concurrently running engine work, analogous to a running
/// transaction.
///
/// Created by the engine when work begins and dropped from the tracker when
/// it ends. Carries the cooperative cancellation flag: marking it requests
/// that the work stop, and the worker observes the request at its own
/// checkpoints (typically before/after lock waits) via [`is_cancelled`].
///
/// [`is_cancelled`]: ExecContext::is_cancelled
#[derive(Debug)]
pub struct ExecContext {
    id: ContextId,
    cancelled: AtomicBool,
    started_at: DateTime<Utc>,
}

impl ExecContext {
    pub(crate) fn new(id: ContextId) -> Self {
        Self {
            id,
            cancelled: AtomicBool::new(false),
            started_at: Utc::now(),
        }
    }

    /// Engine-assigned reference. Opaque outside the engine.
    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Request cooperative cancellation.
    ///
    /// Idempotent and non-blocking. Calling this on work that already
    /// finished is a harmless no-op: the flag is set on a context nothing
    /// polls anymore.
    pub fn mark_cancelled(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// The worker's check-and-yield point. Workers must poll this at their
    /// own checkpoints and unwind when it returns true.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
