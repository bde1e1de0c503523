//! Session handle state machine.
//!
//! ```text
//!          begin_terminate            finish_release
//!   Open ──────────────────► Terminating ──────────► Released
//!     │                                                  ▲
//!     └──────────────────────────────────────────────────┘
//!                 finish_release (normal close)
//! ```
//!
//! Released is terminal. Exactly one caller ever completes the transition
//! into it; every later attempt fails instead of silently no-opping.

use crate::error::SessionError;
use crate::exec::ExecContext;
use chrono::{DateTime, Utc};
use corvus_commons::SessionId;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const STATE_OPEN: u8 = 0;
const STATE_TERMINATING: u8 = 1;
const STATE_RELEASED: u8 = 2;

/// Observable lifecycle state of a session handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Terminating,
    Released,
}

/// Registry-owned wrapper binding a session id to at most one execution
/// context plus release bookkeeping.
///
/// The context slot is mutable because a session is idle between statements:
/// the front-end binds a context when a statement starts and clears it when
/// the statement ends. While the handle is open, any bound context is also
/// present in the execution registry.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    context: RwLock<Option<Arc<ExecContext>>>,
    state: AtomicU8,
    opened_at: DateTime<Utc>,
}

impl SessionHandle {
    pub(crate) fn new(id: SessionId, context: Option<Arc<ExecContext>>) -> Self {
        Self {
            id,
            context: RwLock::new(context),
            state: AtomicU8::new(STATE_OPEN),
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Currently bound execution context, if the session is mid-statement.
    pub fn context(&self) -> Option<Arc<ExecContext>> {
        self.context.read().clone()
    }

    /// Bind the context for a statement. Fails on a handle that already
    /// left the Open state.
    pub fn bind_context(&self, ctx: Arc<ExecContext>) -> Result<(), SessionError> {
        match self.state() {
            SessionState::Open => {
                *self.context.write() = Some(ctx);
                Ok(())
            }
            SessionState::Terminating => Err(SessionError::TerminationInProgress(self.id)),
            SessionState::Released => Err(SessionError::AlreadyReleased(self.id)),
        }
    }

    /// Unbind the context when a statement completes.
    pub fn clear_context(&self) {
        *self.context.write() = None;
    }

    pub fn state(&self) -> SessionState {
        match self.state.load(Ordering::Acquire) {
            STATE_OPEN => SessionState::Open,
            STATE_TERMINATING => SessionState::Terminating,
            _ => SessionState::Released,
        }
    }

    pub fn is_released(&self) -> bool {
        self.state() == SessionState::Released
    }

    /// Claim the terminate step. Single winner: concurrent callers observe
    /// `TerminationInProgress`, and a released handle `AlreadyReleased`.
    pub(crate) fn begin_terminate(&self) -> Result<(), SessionError> {
        match self.state.compare_exchange(
            STATE_OPEN,
            STATE_TERMINATING,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(()),
            Err(STATE_TERMINATING) => Err(SessionError::TerminationInProgress(self.id)),
            Err(_) => Err(SessionError::AlreadyReleased(self.id)),
        }
    }

    /// Complete the transition into Released.
    ///
    /// The atomic swap guarantees exactly one caller sees a non-released
    /// previous state; everyone else gets `AlreadyReleased`.
    pub(crate) fn finish_release(&self) -> Result<(), SessionError> {
        let previous = self.state.swap(STATE_RELEASED, Ordering::AcqRel);
        if previous == STATE_RELEASED {
            return Err(SessionError::AlreadyReleased(self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvus_commons::ContextId;

    fn handle(id: u64) -> SessionHandle {
        SessionHandle::new(SessionId::new(id), None)
    }

    #[test]
    fn test_new_handle_is_open() {
        let h = handle(1);
        assert_eq!(h.state(), SessionState::Open);
        assert!(h.context().is_none());
    }

    #[test]
    fn test_terminate_then_release() {
        let h = handle(2);
        h.begin_terminate().unwrap();
        assert_eq!(h.state(), SessionState::Terminating);
        h.finish_release().unwrap();
        assert!(h.is_released());
    }

    #[test]
    fn test_second_terminate_fails() {
        let h = handle(3);
        h.begin_terminate().unwrap();
        assert_eq!(
            h.begin_terminate(),
            Err(SessionError::TerminationInProgress(SessionId::new(3)))
        );
    }

    #[test]
    fn test_release_is_exactly_once() {
        let h = handle(4);
        h.finish_release().unwrap();
        assert_eq!(
            h.finish_release(),
            Err(SessionError::AlreadyReleased(SessionId::new(4)))
        );
    }

    #[test]
    fn test_terminate_after_release_fails() {
        let h = handle(5);
        h.finish_release().unwrap();
        assert_eq!(
            h.begin_terminate(),
            Err(SessionError::AlreadyReleased(SessionId::new(5)))
        );
    }

    #[test]
    fn test_bind_context_fails_once_released() {
        let h = handle(6);
        let ctx = Arc::new(crate::exec::ExecContext::new(ContextId::new(1)));
        h.finish_release().unwrap();
        assert!(h.bind_context(ctx).is_err());
    }

    #[test]
    fn test_bind_and_clear_context() {
        let h = handle(7);
        let ctx = Arc::new(crate::exec::ExecContext::new(ContextId::new(2)));
        h.bind_context(ctx.clone()).unwrap();
        assert_eq!(h.context().unwrap().id(), ctx.id());
        h.clear_context();
        assert!(h.context().is_none());
    }

    #[test]
    fn test_concurrent_release_single_winner() {
        let h = Arc::new(handle(8));
        let mut winners = 0;
        let mut threads = Vec::new();
        for _ in 0..8 {
            let h = h.clone();
            threads.push(std::thread::spawn(move || h.finish_release().is_ok()));
        }
        for t in threads {
            if t.join().unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert!(h.is_released());
    }
}
