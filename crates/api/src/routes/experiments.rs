//! Route definitions for the `/experiments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::experiment;
use crate::state::AppState;

/// Routes mounted at `/experiments`.
///
/// ```text
/// GET  /                         list
/// GET  /remote                   list_remote (knowledge graph)
/// GET  /{id}                     get_by_id
/// POST /{experiment_id}/ingest   ingest (external id)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(experiment::list))
        .route("/remote", get(experiment::list_remote))
        .route("/{id}", get(experiment::get_by_id))
        .route("/{experiment_id}/ingest", post(experiment::ingest))
}
