//! Execution registry contract consumed by the control plane.

use crate::error::EngineError;
use crate::exec::ExecContext;
use std::sync::Arc;

/// Read-and-signal view over the engine's set of active execution contexts.
///
/// This is the narrow, deliberately exposed boundary between the engine and
/// the administrative surface (no reflection into engine internals). All
/// three operations are required to be internally thread-safe.
///
/// Consistency: `active_contexts` is a best-effort snapshot, not a
/// linearizable view. Contexts may start or finish concurrently with any
/// call; callers must tolerate entries that are gone by the time they act.
pub trait ExecutionRegistry: Send + Sync {
    /// Number of currently active contexts. Point-in-time; may be stale by
    /// the time the caller acts on it.
    fn active_count(&self) -> Result<usize, EngineError>;

    /// Unordered snapshot of the currently active contexts.
    fn active_contexts(&self) -> Result<Vec<Arc<ExecContext>>, EngineError>;

    /// Mark one context for cooperative cancellation.
    ///
    /// Idempotent, never blocks on the context's own progress, and always
    /// succeeds even when the context already finished (a no-op then).
    fn signal_cancel(&self, ctx: &ExecContext);
}
