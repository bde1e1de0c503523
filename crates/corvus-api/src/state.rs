//! Shared handler state.

use corvus_core::{ExecutionTracker, SessionManager, TerminationManager};
use std::sync::Arc;

/// Dependencies injected into every handler via `web::Data`.
///
/// The engine tracker and session manager are the two registries; the
/// termination manager is the admin surface constructed over both. All
/// three are wired at bootstrap, never discovered from global state.
pub struct AppState {
    pub engine: Arc<ExecutionTracker>,
    pub sessions: Arc<SessionManager>,
    pub control: Arc<TerminationManager>,
}

impl AppState {
    pub fn new(engine: Arc<ExecutionTracker>, sessions: Arc<SessionManager>) -> Self {
        let control = Arc::new(TerminationManager::new(engine.clone(), sessions.clone()));
        Self {
            engine,
            sessions,
            control,
        }
    }
}
