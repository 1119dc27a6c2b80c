//! Route definitions for estimation, submissions and statistics.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{estimate, stats, submission};
use crate::state::AppState;

/// ```text
/// POST /estimates      -> create_estimate
/// POST /submissions    -> create_submission
/// GET  /stats          -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/estimates", post(estimate::create_estimate))
        .route("/submissions", post(submission::create_submission))
        .route("/stats", get(stats::get_stats))
}
