//! Server lifecycle management helpers.
//!
//! Encapsulates the heavy lifting so `main.rs` stays a thin orchestrator:
//! constructing the registries and control plane, wiring the HTTP server,
//! and coordinating graceful shutdown.

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use corvus_api::{configure_routes, AppState};
use corvus_commons::ServerConfig;
use corvus_core::{ExecutionTracker, SessionManager, TerminationManager};
use log::{info, warn};
use std::sync::Arc;

/// Aggregated application components shared across the HTTP server and
/// shutdown handling.
pub struct ApplicationComponents {
    pub engine: Arc<ExecutionTracker>,
    pub sessions: Arc<SessionManager>,
    pub control: Arc<TerminationManager>,
}

/// Construct the registries and the control plane over them.
///
/// Collaborators are wired here, explicitly; nothing downstream discovers
/// them from global state.
pub fn bootstrap(config: &ServerConfig) -> ApplicationComponents {
    let engine = Arc::new(ExecutionTracker::new());
    let sessions = Arc::new(SessionManager::new(config.limits.max_sessions));
    let control = Arc::new(TerminationManager::new(engine.clone(), sessions.clone()));

    info!(
        "control plane initialized (max_sessions={})",
        config.limits.max_sessions
    );

    ApplicationComponents {
        engine,
        sessions,
        control,
    }
}

/// Run the HTTP server until it stops, then shut the engine down.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let state = web::Data::new(AppState::new(
        components.engine.clone(),
        components.sessions.clone(),
    ));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.as_str(), config.server.port))?
    .run();

    info!(
        "listening on http://{}:{}/{}",
        config.server.host, config.server.port, config.server.api_version
    );

    // Returns after actix observes SIGINT/SIGTERM and drains connections
    server.await?;

    shutdown(&components);
    Ok(())
}

/// Graceful shutdown: sweep-cancel whatever is still running, then close
/// the registry. Sweep first — a closed registry refuses the sweep.
fn shutdown(components: &ApplicationComponents) {
    match components.control.terminate_all() {
        Ok(signalled) => info!("shutdown: signalled {} active context(s)", signalled),
        Err(e) => warn!("shutdown: could not sweep active contexts: {}", e),
    }
    components.engine.shutdown();
    info!("engine registry closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_wires_components() {
        let config = ServerConfig::default();
        let components = bootstrap(&config);
        assert_eq!(components.control.active_count().unwrap(), 0);
        assert_eq!(components.sessions.open_count(), 0);
    }

    #[test]
    fn test_shutdown_sweeps_then_closes() {
        let config = ServerConfig::default();
        let components = bootstrap(&config);
        let ctx = components.engine.begin().unwrap();

        shutdown(&components);

        assert!(ctx.is_cancelled());
        assert!(components.control.active_count().is_err());
    }
}
