/// Interview Service Main Entry Point
///
/// Starts gRPC server with:
/// - Bearer JWT authentication on every interview RPC
/// - gRPC health and reflection services
/// - Graceful shutdown on Ctrl+C / SIGTERM
use anyhow::{Context, Result};
use interview_service::{
    build_router, config::Settings, store::InterviewStore, telemetry::init_tracing,
};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::load().context("Failed to load configuration")?;

    init_tracing(&settings.log);
    info!("Starting Interview Service");

    let addr = settings.server.addr().context("Invalid server address")?;

    let router = build_router(&settings.jwt, InterviewStore::new()).await?;

    info!("Starting gRPC server on {}", addr);

    router
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Interview service shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}
