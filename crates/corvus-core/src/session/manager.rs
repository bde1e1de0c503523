//! Session registry: externally visible session ids → handles.

use crate::error::SessionError;
use crate::exec::ExecContext;
use crate::session::handle::SessionHandle;
use corvus_commons::SessionId;
use dashmap::DashMap;
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The session registry contract consumed by the bridge.
///
/// `terminate` and `release` are the registry's own two-step protocol:
/// terminate claims the handle and signals cancellation on its wrapped
/// context; release frees the registry entry. Operations against the same
/// id are serialized by the handle's state machine, so callers add no
/// locking of their own.
pub trait SessionRegistry: Send + Sync {
    /// Snapshot of the currently open session ids.
    fn session_ids(&self) -> Vec<SessionId>;

    /// Claim the terminate step for `id` and signal cancellation on the
    /// wrapped context. Returns the claimed handle, to be passed back to
    /// [`release`](SessionRegistry::release).
    fn terminate(&self, id: SessionId) -> Result<Arc<SessionHandle>, SessionError>;

    /// Free the registry entry for a handle previously claimed by
    /// `terminate` (or being closed normally). Exactly one release per
    /// handle ever succeeds.
    fn release(&self, id: SessionId, handle: Arc<SessionHandle>) -> Result<(), SessionError>;
}

/// DashMap-backed session registry owned by the front-end.
///
/// Membership reflects exactly the currently open sessions as of the last
/// observation; sessions open and close concurrently with any read, so every
/// listing is inherently a snapshot.
pub struct SessionManager {
    sessions: DashMap<SessionId, Arc<SessionHandle>>,
    /// Monotonic issuance: an id is never reused within a process lifetime,
    /// which trivially keeps it from colliding with any open session.
    next_id: AtomicU64,
    max_sessions: usize,
}

impl SessionManager {
    pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            next_id: AtomicU64::new(1),
            max_sessions,
        }
    }

    /// Open a new session, optionally already bound to an execution context.
    pub fn open(&self, context: Option<Arc<ExecContext>>) -> Result<Arc<SessionHandle>, SessionError> {
        if self.sessions.len() >= self.max_sessions {
            return Err(SessionError::LimitReached(self.max_sessions));
        }
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let handle = Arc::new(SessionHandle::new(id, context));
        self.sessions.insert(id, handle.clone());
        debug!("session {} opened", id);
        Ok(handle)
    }

    /// Open a session with no execution context bound yet.
    pub fn open_idle(&self) -> Result<Arc<SessionHandle>, SessionError> {
        self.open(None)
    }

    /// Normal close path (client commit/rollback): remove the entry and
    /// release the handle. Returns the handle so the caller can finish any
    /// still-bound execution context through the engine.
    pub fn close(&self, id: SessionId) -> Result<Arc<SessionHandle>, SessionError> {
        let (_, handle) = self
            .sessions
            .remove(&id)
            .ok_or(SessionError::NotFound(id))?;
        handle.finish_release()?;
        debug!("session {} closed", id);
        Ok(handle)
    }

    pub fn open_count(&self) -> usize {
        self.sessions.len()
    }

    /// Fetch the live handle for a session, if still open.
    pub fn get(&self, id: SessionId) -> Option<Arc<SessionHandle>> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SESSIONS)
    }
}

impl SessionRegistry for SessionManager {
    fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }

    fn terminate(&self, id: SessionId) -> Result<Arc<SessionHandle>, SessionError> {
        let handle = self
            .sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound(id))?;

        handle.begin_terminate()?;

        if let Some(ctx) = handle.context() {
            ctx.mark_cancelled();
            info!("session {} terminated, context {} signalled", id, ctx.id());
        } else {
            info!("session {} terminated (idle, no bound context)", id);
        }
        Ok(handle)
    }

    fn release(&self, id: SessionId, handle: Arc<SessionHandle>) -> Result<(), SessionError> {
        // Only the handle we claimed may be freed; a same-id entry written
        // after a concurrent close-and-reopen is somebody else's session.
        let removed = self
            .sessions
            .remove_if(&id, |_, current| Arc::ptr_eq(current, &handle));
        if removed.is_none() {
            return Err(SessionError::NotFound(id));
        }
        handle.finish_release()?;
        debug!("session {} released", id);
        Ok(())
    }
}
