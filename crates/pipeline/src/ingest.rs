//! Experiment ingest from the knowledge graph.

use std::collections::HashSet;

use serde::Serialize;

use lungmap_core::types::DbId;
use lungmap_db::models::experiment::{Experiment, UpsertExperiment};
use lungmap_db::models::image::CreateImage;
use lungmap_db::models::image_set::CreateImageSet;
use lungmap_db::repositories::{ExperimentRepo, ImageRepo, ImageSetRepo, ProbeRepo};
use lungmap_db::DbPool;
use lungmap_sparql::SparqlClient;

use crate::error::IngestError;

/// What one ingest run touched.
#[derive(Debug, Serialize)]
pub struct IngestSummary {
    pub experiment: Experiment,
    pub image_sets: usize,
    pub images: usize,
    pub probes: usize,
}

/// Pull one experiment's metadata, images, and probes from the remote
/// endpoint and upsert them locally.
///
/// All upstream queries run first; the writes then happen in a single
/// transaction, so a failed ingest leaves no partial rows behind and a
/// re-run converges to the same state. Images are grouped into one image
/// set per (experiment, magnification) pair, and every probe the
/// experiment used is attached to each of those sets.
pub async fn ingest_experiment(
    pool: &DbPool,
    sparql: &SparqlClient,
    experiment_id: &str,
) -> Result<IngestSummary, IngestError> {
    let metadata = sparql.experiment_metadata(experiment_id).await?;
    let image_rows = sparql.images_by_experiment(experiment_id).await?;
    let probe_rows = sparql.probes_by_experiment(experiment_id).await?;

    let mut tx = pool.begin().await?;

    let experiment = ExperimentRepo::upsert(
        &mut *tx,
        &UpsertExperiment {
            experiment_id: metadata.experiment_id.clone(),
            platform: Some(metadata.platform.clone()),
            experiment_type: Some(metadata.experiment_type_label.clone()),
            sex: Some(metadata.sex.clone()),
            release_date: Some(metadata.release_date.clone()),
            organism: Some(metadata.organism_label.clone()),
            age_label: Some(metadata.age_label.clone()),
        },
    )
    .await?;

    let mut set_ids: HashSet<DbId> = HashSet::new();
    for row in &image_rows {
        let set = ImageSetRepo::get_or_create(
            &mut *tx,
            &CreateImageSet {
                name: format!("{}_{}", experiment_id, row.magnification),
                magnification: row.magnification.clone(),
                species: metadata.organism_label.clone(),
                development_stage: Some(metadata.age_label.clone()),
            },
        )
        .await?;
        set_ids.insert(set.id);

        ImageRepo::get_or_create(
            &mut *tx,
            &CreateImage {
                s3_key: row.s3_key.clone(),
                image_name: row.image_name.clone(),
                external_image_id: row.external_image_id.clone(),
                image_set_id: set.id,
                experiment_id: experiment.id,
                x_scaling: Some(row.x_scaling.clone()),
                y_scaling: Some(row.y_scaling.clone()),
            },
        )
        .await?;
    }

    for row in &probe_rows {
        let probe = ProbeRepo::get_or_create(&mut *tx, &row.probe_label).await?;
        for &set_id in &set_ids {
            ProbeRepo::attach_to_image_set(&mut *tx, set_id, probe.id, &row.color).await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        experiment_id,
        image_sets = set_ids.len(),
        images = image_rows.len(),
        probes = probe_rows.len(),
        "Ingested experiment"
    );

    Ok(IngestSummary {
        experiment,
        image_sets: set_ids.len(),
        images: image_rows.len(),
        probes: probe_rows.len(),
    })
}
