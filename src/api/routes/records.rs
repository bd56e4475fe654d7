//! Record Routes
//!
//! Positional CRUD over the record collection.
//!
//! - GET /api/v1/records - All records annotated with their index
//! - GET /api/v1/records/recent - Newest records, no date filter
//! - POST /api/v1/records - Append a record
//! - POST /api/v1/records/update - Merge fields into the record at `index`
//! - POST /api/v1/records/delete - Remove the record at `index`

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::api::dto::{required_index, StatusResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::storage::{ExerciseRecord, IndexedRecord, INDEX_FIELD};

/// GET /api/v1/records
pub async fn list_records(State(state): State<Arc<AppState>>) -> Json<Vec<IndexedRecord>> {
    let records = state
        .snapshot()
        .await
        .into_iter()
        .enumerate()
        .map(|(index, record)| IndexedRecord::new(index, record))
        .collect();

    Json(records)
}

/// GET /api/v1/records/recent
pub async fn recent_records(State(state): State<Arc<AppState>>) -> Json<Vec<ExerciseRecord>> {
    let records = state.snapshot().await;
    Json(state.engine.recent_records(&records))
}

/// POST /api/v1/records
///
/// The payload is stored verbatim apart from any `index` key, which is a
/// position and never part of a record.
pub async fn append_record(
    State(state): State<Arc<AppState>>,
    Json(mut record): Json<ExerciseRecord>,
) -> ApiResult<(StatusCode, Json<StatusResponse>)> {
    record.remove(INDEX_FIELD);

    let index = state.store.append(record).await?;

    tracing::info!(index, "Record appended");

    Ok((StatusCode::CREATED, Json(StatusResponse::with_index(index))))
}

/// POST /api/v1/records/update
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<Json<StatusResponse>> {
    let index = required_index(&body)?;

    state.store.update_at(index, &body).await?;

    tracing::info!(index, "Record updated");

    Ok(Json(StatusResponse::success()))
}

/// POST /api/v1/records/delete
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<Json<StatusResponse>> {
    let index = required_index(&body)?;

    let removed = state.store.delete_at(index).await?;

    tracing::info!(index, exercise = %removed.exercise_name(), "Record deleted");

    Ok(Json(StatusResponse::success()))
}
