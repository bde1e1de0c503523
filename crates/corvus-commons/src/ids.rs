//! Identifier newtypes shared between the engine and the session front-end.
//!
//! Two distinct id spaces exist on purpose and are never reconciled:
//! - [`ContextId`] names engine-level work and is opaque outside the engine
//! - [`SessionId`] is the externally visible token clients use
//!
//! A session wraps a context, but nothing maps a context back to a session;
//! embedded callers produce contexts with no session at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine-assigned reference to one unit of running work.
///
/// Not guaranteed stable or meaningful outside the engine process; treat it
/// as opaque. Only the engine mints these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextId(u64);

impl ContextId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// Externally visible token naming one client-facing session.
///
/// Unique among currently open sessions. Issuance is monotonic per process,
/// so an id is never reused while any session it ever named could be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SessionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
