//! Terminate-then-release bridge over the session registry.

use crate::error::{SessionError, TerminationError};
use crate::session::manager::SessionRegistry;
use corvus_commons::SessionId;
use log::warn;
use std::sync::Arc;

/// Drives the registry's two-step terminate/release protocol as one logical
/// operation from the caller's point of view.
///
/// Step order is load-bearing: release without a successful terminate could
/// free resources a statement is still using, so a failed terminate step
/// surfaces [`TerminationError::Failed`] and release is never attempted.
pub struct SessionBridge {
    registry: Arc<dyn SessionRegistry>,
}

impl SessionBridge {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Snapshot of the currently open session ids.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.registry.session_ids()
    }

    /// Terminate one session by its externally visible id.
    ///
    /// Outcomes under contention:
    /// - id never present, or already fully released → `NotFound`
    /// - another caller holds the terminate step → `Failed`
    /// - entry vanished between the two steps → `NotFound` (the registry
    ///   does not guarantee atomicity across the gap, so a vanished entry
    ///   is indistinguishable from one that was never there)
    pub fn terminate_session(&self, id: SessionId) -> Result<(), TerminationError> {
        let handle = self.registry.terminate(id).map_err(|e| match e {
            SessionError::NotFound(_) => TerminationError::NotFound(id),
            other => TerminationError::failed(id, &other),
        })?;

        match self.registry.release(id, handle) {
            Ok(()) => Ok(()),
            Err(SessionError::NotFound(_)) => {
                warn!("session {} vanished between terminate and release", id);
                Err(TerminationError::NotFound(id))
            }
            Err(other) => Err(TerminationError::failed(id, &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::manager::SessionManager;

    fn bridge_with_manager() -> (SessionBridge, Arc<SessionManager>) {
        let manager = Arc::new(SessionManager::default());
        (SessionBridge::new(manager.clone()), manager)
    }

    #[test]
    fn test_terminate_unknown_session() {
        let (bridge, _manager) = bridge_with_manager();
        assert_eq!(
            bridge.terminate_session(SessionId::new(41)).unwrap_err(),
            TerminationError::NotFound(SessionId::new(41))
        );
    }

    #[test]
    fn test_terminate_open_session_releases_it() {
        let (bridge, manager) = bridge_with_manager();
        let handle = manager.open(None).unwrap();
        let id = handle.id();

        bridge.terminate_session(id).unwrap();
        assert!(handle.is_released());
        assert!(manager.session_ids().is_empty());
    }

    #[test]
    fn test_second_terminate_is_not_found() {
        let (bridge, manager) = bridge_with_manager();
        let id = manager.open(None).unwrap().id();

        bridge.terminate_session(id).unwrap();
        assert_eq!(
            bridge.terminate_session(id).unwrap_err(),
            TerminationError::NotFound(id)
        );
    }

    #[test]
    fn test_racing_terminate_step_maps_to_failed() {
        let (bridge, manager) = bridge_with_manager();
        let id = manager.open(None).unwrap().id();

        // Another caller holds the terminate step but has not released yet
        use crate::session::manager::SessionRegistry;
        let _claimed = manager.terminate(id).unwrap();

        match bridge.terminate_session(id).unwrap_err() {
            TerminationError::Failed { id: failed_id, .. } => assert_eq!(failed_id, id),
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
