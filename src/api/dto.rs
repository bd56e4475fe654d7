//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Records themselves travel as `ExerciseRecord` / `IndexedRecord`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::error::{ApiError, ApiResult};
use crate::storage::INDEX_FIELD;

// ============================================
// STATS DTOs
// ============================================

/// Stats query parameters
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    /// Start date (YYYY-MM-DD), inclusive
    #[serde(default)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD), inclusive
    #[serde(default)]
    pub end: Option<String>,
}

// ============================================
// RECORD DTOs
// ============================================

/// Acknowledgement for record mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Status: "success"
    pub status: String,
    /// Index of the appended record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            index: None,
        }
    }

    pub fn with_index(index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::success()
        }
    }
}

/// Pull the required integer `index` out of an update/delete body
pub fn required_index(body: &Map<String, Value>) -> ApiResult<i64> {
    match body.get(INDEX_FIELD) {
        None | Some(Value::Null) => Err(ApiError::Validation("index required".to_string())),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| ApiError::Validation(format!("index must be an integer, got {}", value))),
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Storage status: ok, empty, error
    pub storage: String,
    /// Number of stored records
    pub records: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
