//! Export Routes
//!
//! - GET /api/v1/export - Download every record as CSV

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::export::{records_to_csv, ExportError};

/// Download file name
pub const EXPORT_FILENAME: &str = "records.csv";

/// GET /api/v1/export
pub async fn export_records(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    if !state.store.is_initialized().await {
        return Err(ExportError::NoData.into());
    }

    let records = state.snapshot().await;
    let body = records_to_csv(&records)?;

    tracing::info!(records = records.len(), "Exported records");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
