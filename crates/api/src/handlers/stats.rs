use axum::extract::State;
use axum::Json;
use framerate_core::benchmark::PerformanceStat;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
///
/// Canonical benchmarks grouped by (GPU, CPU) pair.
pub async fn get_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PerformanceStat>>>> {
    let stats = state.engine.performance_stats().await?;
    Ok(Json(DataResponse { data: stats }))
}
