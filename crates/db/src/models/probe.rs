//! Probe vocabulary models.

use serde::Serialize;
use sqlx::FromRow;

use lungmap_core::types::DbId;

/// A row from the `probes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Probe {
    pub id: DbId,
    pub label: String,
}

/// A probe associated with an image set, carrying the stain color used
/// in that set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageSetProbe {
    pub id: DbId,
    pub label: String,
    pub color: String,
}
