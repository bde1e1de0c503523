//! # corvus-commons
//!
//! Shared building blocks used across the CorvusDB workspace:
//! - [`ids`]: `SessionId` and `ContextId` newtypes
//! - [`config`]: server configuration loaded from `config.toml`

pub mod config;
pub mod ids;

pub use config::{ConfigError, LimitsSettings, LoggingSettings, ServerConfig, ServerSettings};
pub use ids::{ContextId, SessionId};
