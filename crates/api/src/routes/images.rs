//! Route definitions for the `/images` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// GET /            list (?experiment=)
/// GET /{id}        get_by_id (read-through cache)
/// GET /{id}/jpeg   get_jpeg (cached preview or 404)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(image::list))
        .route("/{id}", get(image::get_by_id))
        .route("/{id}/jpeg", get(image::get_jpeg))
}
