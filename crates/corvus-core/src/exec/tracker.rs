//! In-process execution tracker.
//!
//! The authoritative registry of running work inside a CorvusDB node. The
//! engine calls [`ExecutionTracker::begin`] when a unit of work starts and
//! [`ExecutionTracker::finish`] when it ends (success, failure, or
//! cancellation alike). The administrative side reaches it only through the
//! [`ExecutionRegistry`] trait.

use crate::error::EngineError;
use crate::exec::{ExecContext, ExecutionRegistry};
use corvus_commons::ContextId;
use dashmap::DashMap;
use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// DashMap-backed execution registry.
///
/// Lock-free concurrent access; many worker threads begin/finish contexts
/// while administrative calls take snapshots. A shutdown gate turns every
/// registry operation into `EngineError::Unavailable` once the node starts
/// going down, so callers never mistake "engine gone" for "nothing running".
pub struct ExecutionTracker {
    /// Active contexts: ContextId → ExecContext
    contexts: DashMap<ContextId, Arc<ExecContext>>,
    /// Monotonic id source; ids are meaningless outside this process
    next_id: AtomicU64,
    shutting_down: AtomicBool,
    shutdown_token: CancellationToken,
}

impl Default for ExecutionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionTracker {
    pub fn new() -> Self {
        Self {
            contexts: DashMap::new(),
            next_id: AtomicU64::new(1),
            shutting_down: AtomicBool::new(false),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Register a new unit of work and return its context.
    pub fn begin(&self) -> Result<Arc<ExecContext>, EngineError> {
        self.ensure_available()?;
        let id = ContextId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let ctx = Arc::new(ExecContext::new(id));
        self.contexts.insert(id, ctx.clone());
        debug!("execution context {} started", id);
        Ok(ctx)
    }

    /// Remove a finished unit of work from the registry.
    ///
    /// Only the engine calls this; the control plane never creates or
    /// destroys contexts. Finishing an already-removed context is a no-op.
    pub fn finish(&self, ctx: &ExecContext) {
        if self.contexts.remove(&ctx.id()).is_some() {
            debug!(
                "execution context {} finished (cancelled={})",
                ctx.id(),
                ctx.is_cancelled()
            );
        }
    }

    /// Close the registry for administrative access and cancel the shutdown
    /// token. Workers may still finish their contexts while unwinding.
    pub fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::Release);
        self.shutdown_token.cancel();
    }

    /// Token cancelled when the engine goes down. Workers awaiting long
    /// suspensions can select on it to unwind promptly.
    pub fn shutdown_signal(&self) -> CancellationToken {
        self.shutdown_token.child_token()
    }

    fn ensure_available(&self) -> Result<(), EngineError> {
        if self.shutting_down.load(Ordering::Acquire) {
            return Err(EngineError::Unavailable(
                "engine is shutting down".to_string(),
            ));
        }
        Ok(())
    }
}

impl ExecutionRegistry for ExecutionTracker {
    fn active_count(&self) -> Result<usize, EngineError> {
        self.ensure_available()?;
        Ok(self.contexts.len())
    }

    fn active_contexts(&self) -> Result<Vec<Arc<ExecContext>>, EngineError> {
        self.ensure_available()?;
        Ok(self
            .contexts
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn signal_cancel(&self, ctx: &ExecContext) {
        // Infallible on purpose: flipping the flag on a finished context is
        // a no-op, and cancellation must never block on the worker.
        ctx.mark_cancelled();
        debug!("cancellation signalled for {}", ctx.id());
    }
}
