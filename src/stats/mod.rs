//! Replog Aggregation Engine
//!
//! Pure, re-computable statistics over a snapshot of exercise records:
//!
//! - **window**: Date range resolution (`[start, end)` in the service timezone)
//! - **engine**: Filtering, recent feed, and the reduction pass
//! - **types**: Output structures (StatsResult, MonthSummary)
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use replog::stats::StatsEngine;
//! use replog::storage::ExerciseRecord;
//!
//! let records = vec![
//!     ExerciseRecord::new("push-up").reps(10).datetime("2024-03-15T08:00:00+09:00"),
//! ];
//!
//! let stats = StatsEngine::default()
//!     .compute(&records, Some("2024-03-01"), Some("2024-03-31"), Utc::now())
//!     .unwrap();
//!
//! assert_eq!(stats.total_count, 1);
//! assert_eq!(stats.total_duration, 20.0);
//! ```

pub mod engine;
pub mod error;
pub mod types;
pub mod window;

pub use engine::{
    estimate_calories, kst, week_number, StatsEngine, DEFAULT_RECENT_LIMIT, DEFAULT_WINDOW_DAYS,
    KST_OFFSET_MINUTES, SECONDS_PER_REP,
};
pub use error::StatsError;
pub use types::{MonthSummary, StatsResult};
pub use window::DateWindow;
