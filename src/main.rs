//! SORMAS-to-SORMAS exchange server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use s2s_api::{AppState, build_app};
use s2s_core::config::AppConfig;
use s2s_core::config::database::DatabaseBackend;
use s2s_core::error::AppError;
use s2s_database::migration::run_migrations;
use s2s_database::{DatabasePool, MemoryStore, PgStore};
use s2s_service::build_services;
use s2s_transport::{ExchangeClient, OrganizationRegistry, RestTransport};

#[tokio::main]
async fn main() {
    let env = std::env::var("S2S_ENV").unwrap_or_else(|_| "development".to_string());
    let config_dir = std::env::var("S2S_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let config = match AppConfig::load_from(&config_dir, &env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, dir = %config_dir, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        organization_id = %config.sormas_to_sormas.organization_id,
        peers = config.sormas_to_sormas.peers.len(),
        "Starting S2S server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Peer registry and outbound transport ────────────
    let registry = Arc::new(OrganizationRegistry::from_config(&config.sormas_to_sormas)?);
    let transport = Arc::new(RestTransport::new(Duration::from_secs(
        config.sormas_to_sormas.request_timeout_seconds,
    ))?);
    let exchange = Arc::new(ExchangeClient::new(registry, transport));

    // ── Step 2: Store and protocol engines ───────────────────────
    let mut db_pool = None;
    let services = match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            run_migrations(pool.pool()).await?;
            let store = Arc::new(PgStore::new(pool.pool().clone()));
            db_pool = Some(pool);
            build_services(store, exchange)
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory store, received data is lost on shutdown");
            build_services(Arc::new(MemoryStore::new()), exchange)
        }
    };

    // ── Step 3: Build and start HTTP server ─────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(AppState::new(services, config.server));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("S2S server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("S2S server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
