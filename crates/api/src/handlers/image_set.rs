//! Handlers for the `/imagesets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use lungmap_core::error::CoreError;
use lungmap_core::types::DbId;
use lungmap_db::models::image::Image;
use lungmap_db::models::image_set::ImageSet;
use lungmap_db::models::probe::ImageSetProbe;
use lungmap_db::models::trained_model::TrainedModelMeta;
use lungmap_db::repositories::{ImageRepo, ImageSetRepo, ProbeRepo, TrainedModelRepo};
use lungmap_pipeline::train_image_set;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// An image set with its images, probes, and current model metadata.
#[derive(Debug, Serialize)]
pub struct ImageSetDetail {
    #[serde(flatten)]
    pub image_set: ImageSet,
    pub images: Vec<Image>,
    pub probes: Vec<ImageSetProbe>,
    pub trained_model: Option<TrainedModelMeta>,
}

/// GET /api/v1/imagesets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<ImageSet>>>> {
    let image_sets = ImageSetRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: image_sets }))
}

/// GET /api/v1/imagesets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ImageSetDetail>> {
    let image_set = ImageSetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ImageSet",
            id,
        }))?;

    let images = ImageRepo::list_by_image_set(&state.pool, id).await?;
    let probes = ProbeRepo::list_by_image_set(&state.pool, id).await?;
    let trained_model = TrainedModelRepo::find_by_image_set(&state.pool, id).await?;

    Ok(Json(ImageSetDetail {
        image_set,
        images,
        probes,
        trained_model,
    }))
}

/// POST /api/v1/imagesets/{id}/train
///
/// Synchronous retrain: fits a classifier from the set's annotations and
/// replaces any prior model, returning the new model's metadata.
pub async fn train(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<TrainedModelMeta>)> {
    let meta = train_image_set(&state.pool, id).await?;
    Ok((StatusCode::CREATED, Json(meta)))
}
