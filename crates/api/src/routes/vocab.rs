//! Route definitions for the anatomy and probe vocabularies.

use axum::routing::get;
use axum::Router;

use crate::handlers::vocab;
use crate::state::AppState;

/// Vocabulary routes merged directly into `/api/v1`.
///
/// ```text
/// GET /anatomy              list_anatomy
/// GET /probes               list_probes
/// GET /probes/{id}/anatomy  anatomy_for_probe
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/anatomy", get(vocab::list_anatomy))
        .route("/probes", get(vocab::list_probes))
        .route("/probes/{id}/anatomy", get(vocab::anatomy_for_probe))
}
