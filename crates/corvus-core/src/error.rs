// Error types module
use corvus_commons::SessionId;
use thiserror::Error;

/// Errors from the execution engine boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The execution registry is not reachable (engine not started or
    /// already shutting down). Never silently mapped to zero/empty.
    #[error("execution engine unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the session registry's own protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(SessionId),

    #[error("session {0} already released")]
    AlreadyReleased(SessionId),

    /// Another caller won the terminate step for this handle
    #[error("session {0} termination already in progress")]
    TerminationInProgress(SessionId),

    #[error("session limit reached ({0} open sessions)")]
    LimitReached(usize),
}

/// Caller-visible outcome of an administrative terminate request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerminationError {
    /// The id is not currently a key in the session registry. Recoverable;
    /// not retried automatically.
    #[error("no open session with id {0}")]
    NotFound(SessionId),

    /// The registry refused or raced the terminate step. Recoverable by
    /// caller retry; never retried automatically (a blind retry could
    /// double-signal).
    #[error("failed to terminate session {id}: {reason}")]
    Failed { id: SessionId, reason: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl TerminationError {
    pub(crate) fn failed(id: SessionId, cause: &SessionError) -> Self {
        Self::Failed {
            id,
            reason: cause.to_string(),
        }
    }
}
