//! Process lifecycle: wiring, serving, and graceful shutdown.

use crate::di::AppModule;
use crate::startup::print_startup_info;
use roster_config::AppConfig;
use roster_core::{RosterError, RosterResult};
use roster_rest::{create_router, AppState};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// Runs the HTTP server until a shutdown signal arrives.
pub async fn run(config: AppConfig) -> RosterResult<()> {
    let app = AppModule::build(&config).await?;

    let state = app
        .health_checks()
        .into_iter()
        .fold(AppState::from_module(&*app.module), AppState::with_health_check);
    let router = create_router(state, &config.server);

    print_startup_info(&config);

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    info!("HTTP server listening on {}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RosterError::Internal(format!("HTTP server error: {}", e)));

    app.close().await;
    info!("Server shutdown complete");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
