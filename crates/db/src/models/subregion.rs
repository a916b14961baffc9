//! Subregion annotation models and DTOs.
//!
//! A subregion is a curator-drawn polygon over one image, labeled with
//! one anatomy term. It exclusively owns its ordered points; deleting
//! the subregion removes them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lungmap_core::types::{DbId, Timestamp};

/// A row from the `subregions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subregion {
    pub id: DbId,
    pub image_id: DbId,
    pub anatomy_id: DbId,
    pub created_at: Timestamp,
}

/// A row from the `points` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Point {
    pub id: DbId,
    pub subregion_id: DbId,
    pub x: i32,
    pub y: i32,
    pub point_order: i32,
}

/// A subregion with its anatomy label and ordered polygon points.
#[derive(Debug, Clone, Serialize)]
pub struct SubregionDetail {
    #[serde(flatten)]
    pub subregion: Subregion,
    pub anatomy_name: String,
    pub points: Vec<Point>,
}

/// DTO for one polygon vertex in a create request. Order is implied by
/// position in the list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePoint {
    pub x: i32,
    pub y: i32,
}

/// DTO for creating a subregion with its polygon in one request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubregion {
    pub image_id: DbId,
    pub anatomy_id: DbId,
    pub points: Vec<CreatePoint>,
}

/// Per-image-set annotation counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageSetSubregionCount {
    pub image_set_id: DbId,
    pub image_set_name: String,
    pub subregion_count: i64,
}

/// Per-anatomy-term annotation counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnatomySubregionCount {
    pub anatomy_id: DbId,
    pub anatomy_name: String,
    pub subregion_count: i64,
}
