//! Image entity models and DTOs.
//!
//! The cached binaries (`image_orig`, `image_jpeg`) are deliberately kept
//! out of [`Image`]: list and detail queries return metadata only, and
//! the blobs go through dedicated repository accessors so multi-megabyte
//! TIFFs never ride along on a listing.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lungmap_core::types::{DbId, Timestamp};

/// A metadata row from the `images` table (no binary columns).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub s3_key: String,
    pub image_name: String,
    pub external_image_id: String,
    pub image_set_id: DbId,
    pub experiment_id: DbId,
    pub x_scaling: Option<String>,
    pub y_scaling: Option<String>,
    /// Content hash of the cached archival bytes; non-empty means the
    /// cached binaries are valid and must not be re-fetched.
    pub image_orig_sha1: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Image {
    /// Whether the cached binaries for this image are populated.
    pub fn is_cached(&self) -> bool {
        self.image_orig_sha1
            .as_deref()
            .is_some_and(|sha| !sha.is_empty())
    }
}

/// DTO for creating a new image record during ingest.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    pub s3_key: String,
    pub image_name: String,
    pub external_image_id: String,
    pub image_set_id: DbId,
    pub experiment_id: DbId,
    pub x_scaling: Option<String>,
    pub y_scaling: Option<String>,
}

/// Cached binaries written back after a fetch-and-convert.
#[derive(Debug, Clone)]
pub struct ImageCache {
    pub image_orig: Vec<u8>,
    pub image_orig_sha1: String,
    pub image_jpeg: Vec<u8>,
}
