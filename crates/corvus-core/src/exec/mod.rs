//! Engine-side execution tracking.
//!
//! The engine registers every unit of running work here and removes it when
//! the work ends, whatever the outcome. The control plane only reads this
//! registry and flips cancellation flags through [`ExecutionRegistry`].

pub mod context;
pub mod registry;
pub mod tracker;

pub use context::ExecContext;
pub use registry::ExecutionRegistry;
pub use tracker::ExecutionTracker;
