//! Taiga Cache admin server
//!
//! Hosts the process-wide metadata cache and exposes its stats and
//! invalidation endpoints over HTTP.

use std::net::SocketAddr;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taiga_cache::api::create_router;
use taiga_cache::{spawn_eviction_task, AdminState, Config};

/// Main entry point for the cache admin server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache
/// 4. Start background expiry sweep
/// 5. Serve the admin router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taiga_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Taiga cache admin server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_size={}, default_ttl={}s, port={}, sweep_interval={}s",
        config.max_size, config.default_ttl, config.admin_port, config.sweep_interval
    );

    let state = AdminState::from_config(&config);

    let sweeper = spawn_eviction_task(state.cache.clone(), config.sweep_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.admin_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Admin server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweeper.
async fn shutdown_signal(sweeper: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweeper.abort();
    warn!("Expiry sweep aborted");
}
