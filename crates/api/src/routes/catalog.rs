//! Route definitions for catalog browsing.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET /catalog                   -> list_catalog
/// GET /components/{kind}/{id}    -> get_component
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog::list_catalog))
        .route("/components/{kind}/{id}", get(catalog::get_component))
}
