//! Statistics output types
//!
//! Derived on every request, never persisted.

use serde::Serialize;

use crate::storage::ExerciseRecord;

/// Aggregated statistics over a filtered window
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StatsResult {
    /// Effective duration in seconds (explicit, or estimated for rep-based exercises)
    pub total_duration: f64,
    /// Number of records inside the window
    pub total_count: u64,
    /// `"Week N"` labels, ascending by N
    pub week_labels: Vec<String>,
    /// Estimated seconds per week bucket, parallel to `week_labels`
    pub weekly_durations: Vec<u64>,
    /// Distinct exercise identifiers in first-seen order
    pub exercise_labels: Vec<String>,
    /// Record count per exercise, parallel to `exercise_labels`
    pub exercise_counts: Vec<u64>,
    /// Up to `recent_limit` newest records in the window
    pub recent_records: Vec<ExerciseRecord>,
    /// Per-month rollups, ascending by month key
    pub monthly_summary: Vec<MonthSummary>,
}

/// Rollup of one `YYYY-MM` month
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MonthSummary {
    /// Month key, `YYYY-MM`
    pub month: String,
    /// Push-up repetitions
    #[serde(rename = "push-up")]
    pub push_up: u64,
    /// Squat repetitions
    pub squat: u64,
    /// Repetitions across every exercise
    pub total_reps: u64,
    /// Currently identical to `total_reps`
    pub intensity: u64,
    /// Estimated kcal (rep-count approximation, not a physiological model)
    pub calories: f64,
}

impl MonthSummary {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            ..Default::default()
        }
    }
}
