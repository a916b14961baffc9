//! Handlers for the `/subregions` resource.
//!
//! Subregions are curator-drawn polygon annotations. Creation writes the
//! subregion row and its ordered points in one transaction; deletion
//! cascades to the points.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use lungmap_core::error::CoreError;
use lungmap_core::types::DbId;
use lungmap_db::models::subregion::{
    AnatomySubregionCount, CreateSubregion, ImageSetSubregionCount, SubregionDetail,
};
use lungmap_db::repositories::{AnatomyRepo, ImageRepo, SubregionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubregionListQuery {
    /// Restrict the listing to annotations on one image.
    pub image: Option<DbId>,
}

/// GET /api/v1/subregions[?image={id}]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SubregionListQuery>,
) -> AppResult<Json<DataResponse<Vec<SubregionDetail>>>> {
    let subregions = match query.image {
        Some(image_id) => SubregionRepo::list_details_by_image(&state.pool, image_id).await?,
        None => SubregionRepo::list_details(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: subregions }))
}

/// POST /api/v1/subregions
///
/// The referenced image and anatomy term must already exist; the polygon
/// itself is stored as-is (degenerate polygons are legal annotations,
/// they just contribute nothing at training time).
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSubregion>,
) -> AppResult<(StatusCode, Json<SubregionDetail>)> {
    if input.points.is_empty() {
        return Err(AppError::BadRequest(
            "a subregion requires at least one point".to_string(),
        ));
    }

    if ImageRepo::find_by_id(&state.pool, input.image_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: input.image_id,
        }));
    }
    if AnatomyRepo::find_by_id(&state.pool, input.anatomy_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Anatomy",
            id: input.anatomy_id,
        }));
    }

    let detail = SubregionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/subregions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SubregionDetail>> {
    let detail = SubregionRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subregion",
            id,
        }))?;
    Ok(Json(detail))
}

/// DELETE /api/v1/subregions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SubregionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Subregion",
            id,
        }))
    }
}

/// GET /api/v1/subregions/counts
pub async fn counts(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ImageSetSubregionCount>>>> {
    let counts = SubregionRepo::count_by_image_set(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}

/// GET /api/v1/subregions/anatomy-aggregation
pub async fn anatomy_aggregation(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AnatomySubregionCount>>>> {
    let counts = SubregionRepo::count_by_anatomy(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}
