//! Repository for the `image_sets` table.

use sqlx::{PgExecutor, PgPool};

use lungmap_core::types::DbId;

use crate::models::image_set::{CreateImageSet, ImageSet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, magnification, species, development_stage, created_at";

/// Provides CRUD operations for image sets.
pub struct ImageSetRepo;

impl ImageSetRepo {
    /// Insert an image set, or return the existing row with the same
    /// unique name.
    ///
    /// The no-op `DO UPDATE SET name = EXCLUDED.name` makes the conflict
    /// arm return the row, so ingest can be re-run without duplicating
    /// sets.
    pub async fn get_or_create<'e>(
        exec: impl PgExecutor<'e>,
        input: &CreateImageSet,
    ) -> Result<ImageSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO image_sets (name, magnification, species, development_stage)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageSet>(&query)
            .bind(&input.name)
            .bind(&input.magnification)
            .bind(&input.species)
            .bind(&input.development_stage)
            .fetch_one(exec)
            .await
    }

    /// Find an image set by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ImageSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM image_sets WHERE id = $1");
        sqlx::query_as::<_, ImageSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all image sets by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ImageSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM image_sets ORDER BY name ASC");
        sqlx::query_as::<_, ImageSet>(&query).fetch_all(pool).await
    }
}
