//! Repository for the `experiments` table.

use sqlx::{PgExecutor, PgPool};

use lungmap_core::types::DbId;

use crate::models::experiment::{Experiment, UpsertExperiment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, experiment_id, platform, experiment_type, sex, \
    release_date, organism, age_label, created_at, updated_at";

/// Provides CRUD operations for experiments.
pub struct ExperimentRepo;

impl ExperimentRepo {
    /// Insert an experiment or overwrite its fetched metadata wholesale.
    ///
    /// Re-ingest is a full overwrite: every knowledge-graph field is
    /// replaced, matching the original save-on-reference behaviour.
    pub async fn upsert<'e>(
        exec: impl PgExecutor<'e>,
        input: &UpsertExperiment,
    ) -> Result<Experiment, sqlx::Error> {
        let query = format!(
            "INSERT INTO experiments
                (experiment_id, platform, experiment_type, sex, release_date, organism, age_label)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (experiment_id) DO UPDATE SET
                platform = EXCLUDED.platform,
                experiment_type = EXCLUDED.experiment_type,
                sex = EXCLUDED.sex,
                release_date = EXCLUDED.release_date,
                organism = EXCLUDED.organism,
                age_label = EXCLUDED.age_label,
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Experiment>(&query)
            .bind(&input.experiment_id)
            .bind(&input.platform)
            .bind(&input.experiment_type)
            .bind(&input.sex)
            .bind(&input.release_date)
            .bind(&input.organism)
            .bind(&input.age_label)
            .fetch_one(exec)
            .await
    }

    /// Find an experiment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Experiment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiments WHERE id = $1");
        sqlx::query_as::<_, Experiment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an experiment by its external consortium identifier.
    pub async fn find_by_external_id(
        pool: &PgPool,
        experiment_id: &str,
    ) -> Result<Option<Experiment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiments WHERE experiment_id = $1");
        sqlx::query_as::<_, Experiment>(&query)
            .bind(experiment_id)
            .fetch_optional(pool)
            .await
    }

    /// List all experiments, most recently ingested first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Experiment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM experiments ORDER BY created_at DESC");
        sqlx::query_as::<_, Experiment>(&query).fetch_all(pool).await
    }
}
