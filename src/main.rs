//! replog API Server
//!
//! Run with: cargo run --bin replog
//!
//! # Configuration
//!
//! Settings come from `config.toml` (see `replog-cli config`), overridden by
//! environment variables:
//! - `REPLOG_CONFIG`: Explicit config file path (startup fails if it cannot be loaded)
//! - `REPLOG_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `REPLOG_API_PORT`: Port to listen on (default: 5000)
//! - `REPLOG_DATA_DIR`: Data directory (default: replog_data)
//! - `REPLOG_STORAGE_BACKEND`: `file` or `memory` (default: file)
//! - `REPLOG_UTC_OFFSET_MINUTES`: Service timezone (default: 540, KST)
//! - `REPLOG_LOG_LEVEL` / `REPLOG_LOG_FORMAT`: Logging (default: info / pretty)
//! - `RUST_LOG`: Full filter directive, wins over `REPLOG_LOG_LEVEL`

use anyhow::Context;
use replog::api::{serve, AppState};
use replog::config::{Config, LoggingConfig, StorageBackend};
use replog::stats::StatsEngine;
use replog::storage::{JsonFileStore, MemoryStore, RecordStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = Config::load_default().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting replog API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(%source, "Configuration loaded");

    let store: Arc<dyn RecordStore> = match config.storage.backend {
        StorageBackend::File => {
            let path = config.storage.records_path();
            tracing::info!("Records file: {:?}", path);
            Arc::new(JsonFileStore::new(path))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory record store, records are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let engine = StatsEngine::from_config(&config.stats).context("Invalid stats configuration")?;
    tracing::info!(timezone = %engine.timezone(), "Statistics engine ready");

    let state = AppState::new(store, engine, config.api.clone());

    serve(state, &config.api)
        .await
        .context("API server failed")?;

    tracing::info!("replog API server stopped");
    Ok(())
}

/// Install the global subscriber: JSON lines or human-readable output
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter_directive().into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
