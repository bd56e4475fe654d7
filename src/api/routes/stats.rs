//! Stats Routes
//!
//! - GET /api/v1/stats?start=YYYY-MM-DD&end=YYYY-MM-DD - Dashboard statistics

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::StatsParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::stats::StatsResult;

/// GET /api/v1/stats
///
/// Without both `start` and `end` the trailing default window is used.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> ApiResult<Json<StatsResult>> {
    let records = state.snapshot().await;

    let result = state.engine.compute(
        &records,
        params.start.as_deref(),
        params.end.as_deref(),
        state.now(),
    )?;

    Ok(Json(result))
}
