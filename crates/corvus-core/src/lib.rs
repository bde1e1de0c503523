//! # corvus-core
//!
//! Execution tracking, client-session registry, and the administrative
//! termination control plane for CorvusDB.
//!
//! ## Architecture
//!
//! ```text
//! Admin call → TerminationManager ──► ExecutionRegistry (count / list / signal_cancel)
//!                      │
//!                      └────────────► SessionBridge ──► SessionRegistry (terminate + release)
//!                                                              │
//!                                                              └── SessionHandle ──► ExecContext
//! ```
//!
//! Two registries, two id spaces:
//! - the **execution registry** holds every running [`exec::ExecContext`],
//!   including work started by embedded callers with no client session
//! - the **session registry** maps externally visible session ids to
//!   [`session::SessionHandle`]s, each wrapping at most one context
//!
//! The control plane only observes the registries and drives their published
//! operations; it never mutates either map directly and never blocks on a
//! cancelled context's own unwind. Cancellation is cooperative: signalling
//! flips a flag that workers poll at their own checkpoints.

pub mod control;
pub mod error;
pub mod exec;
pub mod session;
pub mod test_helpers;

pub use control::TerminationManager;
pub use error::{EngineError, SessionError, TerminationError};
pub use exec::{ExecContext, ExecutionRegistry, ExecutionTracker};
pub use session::{SessionBridge, SessionHandle, SessionManager, SessionRegistry, SessionState};
