//! Repository for the `trained_models` table.

use sqlx::{PgPool, Row};

use lungmap_core::types::DbId;

use crate::models::trained_model::TrainedModelMeta;

/// Metadata column list (excludes the blob).
const META_COLUMNS: &str = "id, image_set_id, created_at, updated_at";

/// Provides operations for per-image-set trained models.
pub struct TrainedModelRepo;

impl TrainedModelRepo {
    /// Persist a model blob for an image set, replacing any prior model.
    ///
    /// A single upsert statement keeps the replacement atomic with
    /// respect to concurrent readers: they observe either the old blob
    /// or the new one, never a partial write.
    pub async fn replace(
        pool: &PgPool,
        image_set_id: DbId,
        model_object: &[u8],
    ) -> Result<TrainedModelMeta, sqlx::Error> {
        let query = format!(
            "INSERT INTO trained_models (image_set_id, model_object)
             VALUES ($1, $2)
             ON CONFLICT (image_set_id) DO UPDATE SET
                model_object = EXCLUDED.model_object,
                updated_at = now()
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, TrainedModelMeta>(&query)
            .bind(image_set_id)
            .bind(model_object)
            .fetch_one(pool)
            .await
    }

    /// Find model metadata for an image set.
    pub async fn find_by_image_set(
        pool: &PgPool,
        image_set_id: DbId,
    ) -> Result<Option<TrainedModelMeta>, sqlx::Error> {
        let query = format!("SELECT {META_COLUMNS} FROM trained_models WHERE image_set_id = $1");
        sqlx::query_as::<_, TrainedModelMeta>(&query)
            .bind(image_set_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the serialized model blob for an image set.
    pub async fn get_blob(
        pool: &PgPool,
        image_set_id: DbId,
    ) -> Result<Option<Vec<u8>>, sqlx::Error> {
        let row = sqlx::query("SELECT model_object FROM trained_models WHERE image_set_id = $1")
            .bind(image_set_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| r.get("model_object")))
    }
}
