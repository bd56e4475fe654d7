//! # replog
//!
//! Personal exercise log - record workouts over HTTP and compute
//! time-windowed training statistics for a dashboard.
//!
//! ## Features
//!
//! - **Positional record store**: one JSON array on disk, addressed by index
//! - **Dashboard statistics**: weekly load, per-exercise counts, monthly
//!   rollups and a recent feed, all bucketed in the service timezone (KST)
//! - **CSV export**: every record, spreadsheet friendly
//!
//! ## Modules
//!
//! - [`storage`]: Record store contract and its file/memory backends
//! - [`stats`]: Aggregation engine
//! - [`export`]: CSV export
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use replog::stats::StatsEngine;
//! use replog::storage::{ExerciseRecord, JsonFileStore, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonFileStore::new("replog_data/records.json");
//!
//!     store
//!         .append(
//!             ExerciseRecord::new("push-up")
//!                 .reps(20)
//!                 .datetime("2024-03-15T08:00:00+09:00"),
//!         )
//!         .await?;
//!
//!     let records = store.read_all().await?;
//!     let stats = StatsEngine::default().compute(&records, None, None, chrono::Utc::now())?;
//!
//!     println!("{} workouts in the last 30 days", stats.total_count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod export;
pub mod stats;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    ExerciseKind, ExerciseRecord, IndexedRecord, JsonFileStore, MemoryStore, RecordStore,
    StorageError, StorageResult,
};

pub use stats::{DateWindow, MonthSummary, StatsEngine, StatsError, StatsResult};

pub use export::{records_to_csv, ExportError};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::Config;
