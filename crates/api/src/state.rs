use std::sync::Arc;

use lungmap_sparql::SparqlClient;
use lungmap_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lungmap_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Knowledge-graph gateway client.
    pub sparql: Arc<SparqlClient>,
    /// Object store holding the source image binaries.
    pub store: Arc<dyn ObjectStore>,
}
