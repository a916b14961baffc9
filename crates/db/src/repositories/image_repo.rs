//! Repository for the `images` table.
//!
//! Metadata queries select [`META_COLUMNS`] only; the cached binaries go
//! through [`ImageRepo::set_cache`], [`ImageRepo::get_orig`], and
//! [`ImageRepo::get_jpeg`] so listings stay lightweight.

use sqlx::{PgExecutor, PgPool, Row};

use lungmap_core::types::DbId;

use crate::models::image::{CreateImage, Image, ImageCache};

/// Metadata column list (excludes the binary columns).
const META_COLUMNS: &str = "id, s3_key, image_name, external_image_id, image_set_id, \
    experiment_id, x_scaling, y_scaling, image_orig_sha1, created_at, updated_at";

/// Provides CRUD and cache operations for images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image record, or return the existing row with the
    /// same external image id (idempotent re-ingest).
    pub async fn get_or_create<'e>(
        exec: impl PgExecutor<'e>,
        input: &CreateImage,
    ) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images
                (s3_key, image_name, external_image_id, image_set_id, experiment_id,
                 x_scaling, y_scaling)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (external_image_id) DO UPDATE SET
                external_image_id = EXCLUDED.external_image_id
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.s3_key)
            .bind(&input.image_name)
            .bind(&input.external_image_id)
            .bind(input.image_set_id)
            .bind(input.experiment_id)
            .bind(&input.x_scaling)
            .bind(&input.y_scaling)
            .fetch_one(exec)
            .await
    }

    /// Find an image's metadata by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {META_COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all image metadata.
    pub async fn list(pool: &PgPool) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!("SELECT {META_COLUMNS} FROM images ORDER BY image_name ASC");
        sqlx::query_as::<_, Image>(&query).fetch_all(pool).await
    }

    /// List image metadata for one experiment.
    pub async fn list_by_experiment(
        pool: &PgPool,
        experiment_id: DbId,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM images
             WHERE experiment_id = $1
             ORDER BY image_name ASC"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(experiment_id)
            .fetch_all(pool)
            .await
    }

    /// List image metadata for one image set.
    pub async fn list_by_image_set(
        pool: &PgPool,
        image_set_id: DbId,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM images
             WHERE image_set_id = $1
             ORDER BY image_name ASC"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(image_set_id)
            .fetch_all(pool)
            .await
    }

    /// Write the fetched binaries and content hash in one statement.
    ///
    /// A single UPDATE keeps replacement atomic for concurrent readers;
    /// two racing fetches for the same image both write equivalent data,
    /// so last-writer-wins is harmless.
    pub async fn set_cache(
        pool: &PgPool,
        id: DbId,
        cache: &ImageCache,
    ) -> Result<Option<Image>, sqlx::Error> {
        let query = format!(
            "UPDATE images SET
                image_orig = $2,
                image_orig_sha1 = $3,
                image_jpeg = $4,
                updated_at = now()
             WHERE id = $1
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .bind(&cache.image_orig)
            .bind(&cache.image_orig_sha1)
            .bind(&cache.image_jpeg)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the cached archival bytes for an image.
    ///
    /// Outer `None` means no such image; inner `None` means not yet
    /// cached.
    pub async fn get_orig(pool: &PgPool, id: DbId) -> Result<Option<Option<Vec<u8>>>, sqlx::Error> {
        let row = sqlx::query("SELECT image_orig FROM images WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| r.get("image_orig")))
    }

    /// Fetch the cached JPEG preview bytes for an image.
    pub async fn get_jpeg(pool: &PgPool, id: DbId) -> Result<Option<Option<Vec<u8>>>, sqlx::Error> {
        let row = sqlx::query("SELECT image_jpeg FROM images WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| r.get("image_jpeg")))
    }
}
