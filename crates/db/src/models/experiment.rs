//! Experiment entity models and DTOs.
//!
//! Experiments are created lazily during ingest; every descriptive field
//! comes from the knowledge graph and is overwritten wholesale on
//! re-ingest.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use lungmap_core::types::{DbId, Timestamp};

/// A row from the `experiments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Experiment {
    pub id: DbId,
    /// External identifier assigned by the consortium (e.g. `LMEX0000000042`).
    pub experiment_id: String,
    pub platform: Option<String>,
    pub experiment_type: Option<String>,
    pub sex: Option<String>,
    pub release_date: Option<String>,
    pub organism: Option<String>,
    pub age_label: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or re-ingesting an experiment.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertExperiment {
    pub experiment_id: String,
    pub platform: Option<String>,
    pub experiment_type: Option<String>,
    pub sex: Option<String>,
    pub release_date: Option<String>,
    pub organism: Option<String>,
    pub age_label: Option<String>,
}
