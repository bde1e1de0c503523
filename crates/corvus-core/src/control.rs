//! Termination control plane: the administrative surface.

use crate::error::{EngineError, TerminationError};
use crate::exec::ExecutionRegistry;
use crate::session::{SessionBridge, SessionRegistry};
use corvus_commons::SessionId;
use log::info;
use std::sync::Arc;

/// Administrative operations over both registries.
///
/// Stateless beyond the injected registry handles: every state machine lives
/// in the registries themselves, and this layer only drives valid
/// transitions. Calls return once the cancellation *signal* is recorded;
/// the work unwinds asynchronously on its own thread, and nothing here ever
/// waits for it.
///
/// Note on populations: [`active_count`](Self::active_count) covers all
/// engine-level work while [`active_session_ids`](Self::active_session_ids)
/// covers only client-session-fronted work. The two diverge whenever
/// embedded callers run contexts with no session, which is expected and not
/// a bug.
pub struct TerminationManager {
    engine: Arc<dyn ExecutionRegistry>,
    sessions: SessionBridge,
}

impl TerminationManager {
    /// Construct with explicit handles to both registries. Collaborators
    /// are injected, never discovered from global state.
    pub fn new(engine: Arc<dyn ExecutionRegistry>, sessions: Arc<dyn SessionRegistry>) -> Self {
        Self {
            engine,
            sessions: SessionBridge::new(sessions),
        }
    }

    /// Number of currently active execution contexts, embedded work
    /// included. Point-in-time; may be stale by the time the caller acts.
    pub fn active_count(&self) -> Result<usize, EngineError> {
        self.engine.active_count()
    }

    /// Currently open client session ids.
    pub fn active_session_ids(&self) -> Vec<SessionId> {
        self.sessions.session_ids()
    }

    /// Terminate one session by its externally visible id.
    pub fn terminate_session(&self, id: SessionId) -> Result<(), TerminationError> {
        self.sessions.terminate_session(id)
    }

    /// Signal cancellation on every context active at snapshot time.
    ///
    /// Bypasses the session registry on purpose: this is the only operation
    /// guaranteed to reach embedded callers. Returns the number of contexts
    /// signalled. Contexts finishing between listing and signalling are
    /// harmless (each signal is individually idempotent), and contexts
    /// started after the snapshot are not signalled.
    pub fn terminate_all(&self) -> Result<usize, EngineError> {
        let snapshot = self.engine.active_contexts()?;
        for ctx in &snapshot {
            self.engine.signal_cancel(ctx);
        }
        info!("terminate_all signalled {} context(s)", snapshot.len());
        Ok(snapshot.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::ExecutionTracker;
    use crate::session::SessionManager;

    fn control_plane() -> (
        TerminationManager,
        Arc<ExecutionTracker>,
        Arc<SessionManager>,
    ) {
        let tracker = Arc::new(ExecutionTracker::new());
        let sessions = Arc::new(SessionManager::default());
        let control = TerminationManager::new(tracker.clone(), sessions.clone());
        (control, tracker, sessions)
    }

    #[test]
    fn test_empty_registries() {
        let (control, _tracker, _sessions) = control_plane();
        assert_eq!(control.active_count().unwrap(), 0);
        assert!(control.active_session_ids().is_empty());
        assert_eq!(control.terminate_all().unwrap(), 0);
    }

    #[test]
    fn test_populations_diverge_with_embedded_work() {
        let (control, tracker, sessions) = control_plane();

        // One embedded context, one session-fronted context
        let _embedded = tracker.begin().unwrap();
        let ctx = tracker.begin().unwrap();
        let handle = sessions.open(Some(ctx)).unwrap();

        assert_eq!(control.active_count().unwrap(), 2);
        assert_eq!(control.active_session_ids(), vec![handle.id()]);
    }

    #[test]
    fn test_terminate_all_reaches_embedded_contexts() {
        let (control, tracker, sessions) = control_plane();
        let embedded = tracker.begin().unwrap();
        let ctx = tracker.begin().unwrap();
        sessions.open(Some(ctx.clone())).unwrap();

        assert_eq!(control.terminate_all().unwrap(), 2);
        assert!(embedded.is_cancelled());
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_terminate_all_with_unavailable_engine() {
        let (control, tracker, _sessions) = control_plane();
        tracker.shutdown();
        assert!(matches!(
            control.terminate_all(),
            Err(EngineError::Unavailable(_))
        ));
        assert!(matches!(
            control.active_count(),
            Err(EngineError::Unavailable(_))
        ));
    }

    #[test]
    fn test_terminate_session_propagates_not_found() {
        let (control, _tracker, _sessions) = control_plane();
        assert_eq!(
            control.terminate_session(SessionId::new(12)).unwrap_err(),
            TerminationError::NotFound(SessionId::new(12))
        );
    }
}
