//! Handlers for the `/experiments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use lungmap_core::error::CoreError;
use lungmap_core::types::DbId;
use lungmap_db::models::experiment::Experiment;
use lungmap_db::repositories::ExperimentRepo;
use lungmap_pipeline::{ingest_experiment, IngestSummary};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/experiments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Experiment>>>> {
    let experiments = ExperimentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: experiments }))
}

/// GET /api/v1/experiments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Experiment>> {
    let experiment = ExperimentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Experiment",
            id,
        }))?;
    Ok(Json(experiment))
}

/// POST /api/v1/experiments/{experiment_id}/ingest
///
/// The path segment is the external consortium identifier, not a row id:
/// ingest is how an experiment first comes into existence locally.
pub async fn ingest(
    State(state): State<AppState>,
    Path(experiment_id): Path<String>,
) -> AppResult<(StatusCode, Json<IngestSummary>)> {
    let summary = ingest_experiment(&state.pool, &state.sparql, &experiment_id).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/v1/experiments/remote
///
/// Lists the external identifiers of every experiment in the knowledge
/// graph that has at least one image, for discovering what to ingest.
pub async fn list_remote(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let ids = state.sparql.list_experiments_with_images().await?;
    Ok(Json(DataResponse { data: ids }))
}
