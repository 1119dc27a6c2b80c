//! Handler for crowd-sourced FPS submissions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use framerate_core::submission::FpsSubmission;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/submissions
///
/// Returns 201 for every accepted submission; `createdBenchmark` tells the
/// caller whether it became the canonical sample.
pub async fn create_submission(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<FpsSubmission>,
) -> AppResult<impl IntoResponse> {
    let record = state.engine.submit(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}
