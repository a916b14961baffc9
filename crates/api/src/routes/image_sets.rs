//! Route definitions for the `/imagesets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::image_set;
use crate::state::AppState;

/// Routes mounted at `/imagesets`.
///
/// ```text
/// GET  /            list
/// GET  /{id}        get_by_id (detail with images, probes, model)
/// POST /{id}/train  train (synchronous retrain)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(image_set::list))
        .route("/{id}", get(image_set::get_by_id))
        .route("/{id}/train", post(image_set::train))
}
