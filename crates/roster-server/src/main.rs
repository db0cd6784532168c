//! # Roster Server
//!
//! Main entry point for the Roster HTTP service.

use roster_config::ConfigLoader;
use roster_core::RosterResult;
use roster_server::{app, logging};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("roster-server: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> RosterResult<()> {
    let config = ConfigLoader::from_default_location()?.into_config();

    logging::init_logging(&config.observability);

    info!("Starting Roster Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    app::run(config).await
}
