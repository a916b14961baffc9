pub mod experiments;
pub mod health;
pub mod image_sets;
pub mod images;
pub mod subregions;
pub mod vocab;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /experiments                          list
/// /experiments/remote                   list ingestable ids (knowledge graph)
/// /experiments/{id}                     get
/// /experiments/{experiment_id}/ingest   ingest from knowledge graph (POST)
///
/// /imagesets                            list
/// /imagesets/{id}                       get (with images, probes, model)
/// /imagesets/{id}/train                 retrain classifier (POST)
///
/// /images                               list (?experiment=)
/// /images/{id}                          get (read-through cache)
/// /images/{id}/jpeg                     cached JPEG preview
///
/// /subregions                           list (?image=), create
/// /subregions/counts                    per-image-set counts
/// /subregions/anatomy-aggregation       per-anatomy counts
/// /subregions/{id}                      get, delete
///
/// /anatomy                              list
/// /probes                               list
/// /probes/{id}/anatomy                  anatomy terms mapped to a probe
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/experiments", experiments::router())
        .nest("/imagesets", image_sets::router())
        .nest("/images", images::router())
        .nest("/subregions", subregions::router())
        .merge(vocab::router())
}
