//! Handlers for the `/anatomy` and `/probes` vocabularies.
//!
//! Both vocabularies grow implicitly (ingest creates probes, annotation
//! tooling seeds anatomy); the HTTP surface is read-only.

use axum::extract::{Path, State};
use axum::Json;

use lungmap_core::error::CoreError;
use lungmap_core::types::DbId;
use lungmap_db::models::anatomy::Anatomy;
use lungmap_db::models::probe::Probe;
use lungmap_db::repositories::{AnatomyRepo, ProbeRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/anatomy
pub async fn list_anatomy(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Anatomy>>>> {
    let anatomy = AnatomyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: anatomy }))
}

/// GET /api/v1/probes
pub async fn list_probes(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Probe>>>> {
    let probes = ProbeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: probes }))
}

/// GET /api/v1/probes/{id}/anatomy
pub async fn anatomy_for_probe(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Anatomy>>>> {
    if ProbeRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Probe",
            id,
        }));
    }
    let anatomy = ProbeRepo::anatomy_for_probe(&state.pool, id).await?;
    Ok(Json(DataResponse { data: anatomy }))
}
