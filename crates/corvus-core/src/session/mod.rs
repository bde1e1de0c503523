//! Client-session registry and the terminate-then-release bridge.
//!
//! The front-end owns this registry: it maps externally visible session ids
//! to handles wrapping at most one execution context each. The control plane
//! only observes it, terminates through it, and releases via it.

pub mod bridge;
pub mod handle;
pub mod manager;

pub use bridge::SessionBridge;
pub use handle::{SessionHandle, SessionState};
pub use manager::{SessionManager, SessionRegistry};
