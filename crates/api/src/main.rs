use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use schoolhub_api::config::ServerConfig;
use schoolhub_api::router::build_app_router;
use schoolhub_api::state::AppState;
use schoolhub_api::storage::ImageStore;
use schoolhub_db::{DbConfig, PoolManager};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "schoolhub_api=debug,schoolhub_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        public_dir = %config.public_dir.display(),
        "Loaded server configuration"
    );

    let db_config = DbConfig::from_env().expect("Invalid database configuration");
    tracing::info!(?db_config, "Loaded database configuration");

    // --- Database ---
    let db = Arc::new(PoolManager::new(&db_config).expect("Invalid database connection options"));

    // Connectivity and schema problems are reported, not fatal: handlers
    // retry the bootstrap on first use.
    if db.test().await {
        if let Err(e) = db.ready().await {
            tracing::warn!(error = %e, "Schema bootstrap deferred to first request");
        }
    } else {
        tracing::warn!("Database unreachable at startup; requests will fail until it recovers");
    }

    // --- App state ---
    let images = Arc::new(ImageStore::new(&config.public_dir));
    let state = AppState {
        db: Arc::clone(&db),
        config: Arc::new(config.clone()),
        images,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let timeout = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(timeout, db.close()).await.is_err() {
        tracing::warn!(?timeout, "Timed out closing the database pool");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
