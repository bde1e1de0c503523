// CorvusDB server entrypoint
//!
//! The heavy lifting (registry construction, HTTP wiring, graceful
//! shutdown) lives in dedicated modules so this file remains a thin
//! orchestrator.

mod lifecycle;
mod logging;

use anyhow::Result;
use corvus_commons::ServerConfig;
use lifecycle::{bootstrap, run};
use log::info;
use std::path::Path;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when config file missing)
    let config_path = "config.toml";
    let config = if Path::new(config_path).exists() {
        match ServerConfig::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("❌ FATAL: failed to load {}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        ServerConfig::default()
    };

    // Logging before any other side effects
    logging::init_logging(&config.logging)?;

    info!("CorvusDB server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Host: {}  Port: {}  Workers: {}",
        config.server.host, config.server.port, config.server.workers
    );

    let components = bootstrap(&config);
    run(&config, components).await
}
