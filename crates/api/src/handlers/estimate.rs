use axum::extract::State;
use axum::Json;
use framerate_core::estimation::{EstimateRequest, EstimateResult};

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/estimates
pub async fn create_estimate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<EstimateRequest>,
) -> AppResult<Json<DataResponse<EstimateResult>>> {
    let result = state.engine.estimate(&request).await?;

    tracing::info!(
        gpu_id = %request.gpu_id,
        cpu_id = %request.cpu_id,
        game_id = %request.game_id,
        source = result.source.as_str(),
        avg_fps = result.avg_fps,
        "Estimate served"
    );

    Ok(Json(DataResponse { data: result }))
}
