//! Handlers for catalog listing and component detail.

use axum::extract::{Path, State};
use axum::Json;
use framerate_core::catalog::{CatalogListing, ComponentDetails, ComponentKind};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalog
///
/// GPUs, CPUs, games, RAM kits and the fixed resolution/preset options.
pub async fn list_catalog(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CatalogListing>>> {
    let listing = state.engine.list_catalog().await?;
    Ok(Json(DataResponse { data: listing }))
}

/// GET /api/v1/components/{kind}/{id}
///
/// `kind` is one of `gpu`, `cpu`, `game`, `ram`.
pub async fn get_component(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<ComponentDetails>>> {
    let kind = ComponentKind::parse(&kind).ok_or_else(|| {
        let known: Vec<_> = ComponentKind::ALL.iter().map(|k| k.as_str()).collect();
        AppError::BadRequest(format!(
            "Unknown component kind '{kind}'. Must be one of: {}",
            known.join(", ")
        ))
    })?;

    let details = state.engine.component_details(kind, &id).await?;
    Ok(Json(DataResponse { data: details }))
}
