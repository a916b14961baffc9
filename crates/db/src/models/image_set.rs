//! Image set entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lungmap_core::types::{DbId, Timestamp};

/// A row from the `image_sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageSet {
    pub id: DbId,
    pub name: String,
    pub magnification: String,
    pub species: String,
    pub development_stage: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new image set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImageSet {
    pub name: String,
    pub magnification: String,
    pub species: String,
    pub development_stage: Option<String>,
}
