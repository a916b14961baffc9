//! Repository for the `anatomy` vocabulary table.

use sqlx::{PgExecutor, PgPool};

use lungmap_core::types::DbId;

use crate::models::anatomy::Anatomy;

/// Provides operations on the anatomy vocabulary.
pub struct AnatomyRepo;

impl AnatomyRepo {
    /// Insert an anatomy term, or return the existing row for it.
    pub async fn get_or_create<'e>(
        exec: impl PgExecutor<'e>,
        name: &str,
    ) -> Result<Anatomy, sqlx::Error> {
        sqlx::query_as::<_, Anatomy>(
            "INSERT INTO anatomy (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name",
        )
        .bind(name)
        .fetch_one(exec)
        .await
    }

    /// Find an anatomy term by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Anatomy>, sqlx::Error> {
        sqlx::query_as::<_, Anatomy>("SELECT id, name FROM anatomy WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the full anatomy vocabulary.
    pub async fn list(pool: &PgPool) -> Result<Vec<Anatomy>, sqlx::Error> {
        sqlx::query_as::<_, Anatomy>("SELECT id, name FROM anatomy ORDER BY name ASC")
            .fetch_all(pool)
            .await
    }
}
