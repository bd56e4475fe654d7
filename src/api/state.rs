//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::stats::StatsEngine;
use crate::storage::{ExerciseRecord, RecordStore};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Record store (file or memory backed)
    pub store: Arc<dyn RecordStore>,
    /// Aggregation engine configured with the service timezone
    pub engine: Arc<StatsEngine>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, engine: StatsEngine, config: ApiConfig) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Reference "now" for statistics
    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Read every record for a read-only view.
    ///
    /// Read paths stay available: an unreadable store is served as empty.
    pub async fn snapshot(&self) -> Vec<ExerciseRecord> {
        match self.store.read_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Record store unreadable, serving empty collection");
                Vec::new()
            }
        }
    }
}
