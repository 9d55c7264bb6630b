//! Waitline Daemon - Main Entry Point
//!
//! Composition root: wires the SQLite store, the queue service, the
//! notifier, and the JSON-RPC server together and owns their lifecycle.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use waitline_api_rpc::{RpcServer, RpcServerConfig};
use waitline_core::application::QueueService;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::BroadcastNotifier;
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteQueueRepository};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.waitline/queue.db";
const DEFAULT_RPC_PORT: u16 = 9538;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("WAITLINE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("waitline=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Waitline v{} starting...", VERSION);

    // 2. Load configuration
    let db_path = std::env::var("WAITLINE_DB_PATH")
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    let rpc_port: u16 = std::env::var("WAITLINE_RPC_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RPC_PORT);

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database (creates the session row exactly once)
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let store = Arc::new(SqliteQueueRepository::new(pool.clone()));

    // Notifier is constructed here, torn down with the process - no
    // lazily initialized global transport handle
    let notifier = Arc::new(BroadcastNotifier::new());

    let queue_service = Arc::new(QueueService::new(
        store.clone(),
        store.clone(),
        notifier.clone(),
        time_provider,
    ));

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        port: rpc_port,
        ..Default::default()
    };
    let rpc_server = RpcServer::new(rpc_config, queue_service, notifier);
    let (rpc_addr, rpc_handle) = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %rpc_addr, "System ready. Waiting for callers...");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");

    Ok(())
}
