//! Trained model models.
//!
//! The serialized classifier blob is opaque to this layer; only the
//! pipeline crate knows how to load it. Metadata queries never select
//! the blob column.

use serde::Serialize;
use sqlx::FromRow;

use lungmap_core::types::{DbId, Timestamp};

/// Metadata for a row in `trained_models` (no blob).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainedModelMeta {
    pub id: DbId,
    pub image_set_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
