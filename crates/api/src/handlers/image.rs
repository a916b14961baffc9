//! Handlers for the `/images` resource.
//!
//! `get_by_id` is the read-through cache: the first request for an image
//! downloads the source binary, converts it, and stores the results; the
//! populated `image_orig_sha1` gates every later request onto the cached
//! copy.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use lungmap_core::error::CoreError;
use lungmap_core::types::DbId;
use lungmap_db::models::image::{Image, ImageCache};
use lungmap_db::repositories::ImageRepo;
use lungmap_storage::fetch_and_convert;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageListQuery {
    /// Restrict the listing to one experiment's images.
    pub experiment: Option<DbId>,
}

/// GET /api/v1/images[?experiment={id}]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ImageListQuery>,
) -> AppResult<Json<DataResponse<Vec<Image>>>> {
    let images = match query.experiment {
        Some(experiment_id) => ImageRepo::list_by_experiment(&state.pool, experiment_id).await?,
        None => ImageRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: images }))
}

/// GET /api/v1/images/{id}
///
/// Read-through: a cache miss fetches and converts the source binary
/// before responding. Two racing misses both fetch and write equivalent
/// data, so no per-image locking is taken.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Image>> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))?;

    if image.is_cached() {
        return Ok(Json(image));
    }

    let fetched = fetch_and_convert(state.store.as_ref(), &image.s3_key).await?;
    let cache = ImageCache {
        image_orig: fetched.archival_tiff,
        image_orig_sha1: fetched.sha1_hex,
        image_jpeg: fetched.preview_jpeg,
    };
    let updated = ImageRepo::set_cache(&state.pool, id, &cache)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))?;

    Ok(Json(updated))
}

/// GET /api/v1/images/{id}/jpeg
///
/// Serves the cached JPEG preview. The cache is only populated by a
/// prior `GET /images/{id}`; an uncached image is a 404, not a fetch.
pub async fn get_jpeg(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let jpeg = ImageRepo::get_jpeg(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))?
        .ok_or_else(|| AppError::NotFound("image not yet cached".to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg))
}
