//! Route definitions for the `/subregions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::subregion;
use crate::state::AppState;

/// Routes mounted at `/subregions`.
///
/// ```text
/// GET    /                     list (?image=)
/// POST   /                     create
/// GET    /counts               per-image-set counts
/// GET    /anatomy-aggregation  per-anatomy counts
/// GET    /{id}                 get_by_id
/// DELETE /{id}                 delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subregion::list).post(subregion::create))
        .route("/counts", get(subregion::counts))
        .route("/anatomy-aggregation", get(subregion::anatomy_aggregation))
        .route(
            "/{id}",
            get(subregion::get_by_id).delete(subregion::delete),
        )
}
