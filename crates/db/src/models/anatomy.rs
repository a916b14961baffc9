//! Anatomy vocabulary models.

use serde::Serialize;
use sqlx::FromRow;

use lungmap_core::types::DbId;

/// A row from the `anatomy` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Anatomy {
    pub id: DbId,
    pub name: String,
}
