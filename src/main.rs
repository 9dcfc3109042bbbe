//! Loanee Cache - caching proxy for football loanee data
//!
//! Forwards requests to a sports data API with the secret token injected,
//! caching responses under per-category TTL policies.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loanee_cache::api::create_router;
use loanee_cache::{spawn_sweeper, AppState, Config, SweeperHandle};

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache context and upstream client
/// 4. Tune the loan roster policy for today's date
/// 5. Start the background expiry sweeper
/// 6. Serve HTTP until SIGINT/SIGTERM, then stop the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loanee_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Loanee Cache proxy");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, sweep_interval={}s, upstream={}, upstream_timeout={}s",
        config.server_port, config.sweep_interval, config.upstream_base_url, config.upstream_timeout
    );

    let state = AppState::from_config(&config).context("failed to build upstream client")?;
    {
        let ttl = state.cache.write().await.update_loan_data_ttl_now();
        info!("Cache initialized, loan roster TTL {}s", ttl.as_secs());
    }

    let sweeper = spawn_sweeper(state.cache.clone(), config.sweep_period());
    info!("Background expiry sweeper started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweeper.
async fn shutdown_signal(sweeper: SweeperHandle) {
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

    sweeper.stop();
    warn!("Expiry sweeper stopped");
}
