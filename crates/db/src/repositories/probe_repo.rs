//! Repository for the `probes`, `image_set_probe_map`, and
//! `anatomy_probe_map` tables.

use sqlx::{PgExecutor, PgPool};

use lungmap_core::types::DbId;

use crate::models::anatomy::Anatomy;
use crate::models::probe::{ImageSetProbe, Probe};

/// Provides operations on the probe vocabulary and its associations.
pub struct ProbeRepo;

impl ProbeRepo {
    /// Insert a probe label, or return the existing row for it.
    pub async fn get_or_create<'e>(
        exec: impl PgExecutor<'e>,
        label: &str,
    ) -> Result<Probe, sqlx::Error> {
        sqlx::query_as::<_, Probe>(
            "INSERT INTO probes (label) VALUES ($1)
             ON CONFLICT (label) DO UPDATE SET label = EXCLUDED.label
             RETURNING id, label",
        )
        .bind(label)
        .fetch_one(exec)
        .await
    }

    /// Find a probe by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Probe>, sqlx::Error> {
        sqlx::query_as::<_, Probe>("SELECT id, label FROM probes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the full probe vocabulary.
    pub async fn list(pool: &PgPool) -> Result<Vec<Probe>, sqlx::Error> {
        sqlx::query_as::<_, Probe>("SELECT id, label FROM probes ORDER BY label ASC")
            .fetch_all(pool)
            .await
    }

    /// Associate a probe with an image set under a stain color.
    ///
    /// Re-ingest updates the color rather than duplicating the pair.
    pub async fn attach_to_image_set<'e>(
        exec: impl PgExecutor<'e>,
        image_set_id: DbId,
        probe_id: DbId,
        color: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO image_set_probe_map (image_set_id, probe_id, color)
             VALUES ($1, $2, $3)
             ON CONFLICT (image_set_id, probe_id) DO UPDATE SET color = EXCLUDED.color",
        )
        .bind(image_set_id)
        .bind(probe_id)
        .bind(color)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// List the probes (with stain colors) attached to an image set.
    pub async fn list_by_image_set(
        pool: &PgPool,
        image_set_id: DbId,
    ) -> Result<Vec<ImageSetProbe>, sqlx::Error> {
        sqlx::query_as::<_, ImageSetProbe>(
            "SELECT p.id, p.label, m.color
             FROM probes p
             JOIN image_set_probe_map m ON m.probe_id = p.id
             WHERE m.image_set_id = $1
             ORDER BY p.label ASC",
        )
        .bind(image_set_id)
        .fetch_all(pool)
        .await
    }

    /// Map a probe to an anatomy term it marks. Idempotent.
    pub async fn map_anatomy<'e>(
        exec: impl PgExecutor<'e>,
        probe_id: DbId,
        anatomy_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO anatomy_probe_map (probe_id, anatomy_id)
             VALUES ($1, $2)
             ON CONFLICT (probe_id, anatomy_id) DO NOTHING",
        )
        .bind(probe_id)
        .bind(anatomy_id)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// List the anatomy terms mapped to a probe.
    pub async fn anatomy_for_probe(
        pool: &PgPool,
        probe_id: DbId,
    ) -> Result<Vec<Anatomy>, sqlx::Error> {
        sqlx::query_as::<_, Anatomy>(
            "SELECT a.id, a.name
             FROM anatomy a
             JOIN anatomy_probe_map m ON m.anatomy_id = a.id
             WHERE m.probe_id = $1
             ORDER BY a.name ASC",
        )
        .bind(probe_id)
        .fetch_all(pool)
        .await
    }
}
