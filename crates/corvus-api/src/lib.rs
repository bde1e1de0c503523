//! # corvus-api
//!
//! HTTP surface for CorvusDB's termination control plane.
//!
//! Two route groups under `/v1`:
//! - `/v1/admin/*` — the four administrative operations (count, list,
//!   terminate one, terminate all)
//! - `/v1/sessions/*` — minimal session open/commit endpoints, enough for a
//!   client to hold work the admin surface can observe and cancel
//!
//! The transport is deliberately thin: every handler delegates straight to
//! `corvus-core` and maps its typed errors onto status codes.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::configure_routes;
pub use state::AppState;
