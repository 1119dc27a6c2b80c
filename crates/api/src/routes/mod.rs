pub mod catalog;
pub mod estimates;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog                          GET   listCatalog
/// /components/{kind}/{id}           GET   catalog record + recent benchmarks
///
/// /estimates                        POST  estimate
/// /submissions                      POST  submit
/// /stats                            GET   per GPU/CPU pair statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .merge(estimates::router())
}
