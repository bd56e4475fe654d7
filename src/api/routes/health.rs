//! Health Routes
//!
//! Health check endpoints for monitoring and container orchestration.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (record store readable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the record store can be read.
/// A store that was never written is ready.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.store.read_all().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
///
/// Full health status with record store details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, storage, records) = match state.store.read_all().await {
        Ok(records) if records.is_empty() => ("healthy", "empty", 0),
        Ok(records) => ("healthy", "ok", records.len()),
        Err(_) => ("degraded", "error", 0),
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage: storage.to_string(),
        records,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
