//! Classifier training over an image set's annotated subregions.

use lungmap_core::classifier::Pipeline;
use lungmap_core::features::{self, TrainingExample};
use lungmap_core::polygon::Vertex;
use lungmap_core::types::DbId;
use lungmap_db::models::trained_model::TrainedModelMeta;
use lungmap_db::repositories::{ImageRepo, ImageSetRepo, SubregionRepo, TrainedModelRepo};
use lungmap_db::DbPool;

use crate::error::TrainError;

/// Fit a classifier from every annotated subregion in an image set and
/// persist it, replacing any prior model for the set.
///
/// Each subregion contributes one training example: the pixel statistics
/// inside its polygon, labeled with its anatomy term. Images without
/// annotations are skipped; an annotated image whose archival binary was
/// never cached aborts the run, since training on a subset would produce
/// a model that silently ignores part of the ground truth.
pub async fn train_image_set(
    pool: &DbPool,
    image_set_id: DbId,
) -> Result<TrainedModelMeta, TrainError> {
    if ImageSetRepo::find_by_id(pool, image_set_id).await?.is_none() {
        return Err(TrainError::ImageSetNotFound(image_set_id));
    }

    let images = ImageRepo::list_by_image_set(pool, image_set_id).await?;

    let mut examples: Vec<TrainingExample> = Vec::new();
    for image in &images {
        let subregions = SubregionRepo::list_details_by_image(pool, image.id).await?;
        if subregions.is_empty() {
            continue;
        }

        let orig = ImageRepo::get_orig(pool, image.id)
            .await?
            .flatten()
            .ok_or(TrainError::MissingCache { image_id: image.id })?;
        let rgb = image::load_from_memory(&orig)
            .map_err(|source| TrainError::Decode {
                image_id: image.id,
                source,
            })?
            .to_rgb8();

        for subregion in &subregions {
            let vertices: Vec<Vertex> = subregion
                .points
                .iter()
                .map(|p| Vertex::new(p.x, p.y))
                .collect();
            examples.push(features::extract(&rgb, &vertices, &subregion.anatomy_name));
        }
    }

    if examples.is_empty() {
        return Err(TrainError::NoTrainingData { image_set_id });
    }

    let pipeline = Pipeline::fit(&examples)?;
    let blob = pipeline.to_bytes()?;
    let meta = TrainedModelRepo::replace(pool, image_set_id, &blob).await?;

    tracing::info!(
        image_set_id,
        examples = examples.len(),
        labels = ?pipeline.labels(),
        model_bytes = blob.len(),
        "Trained and stored image set model"
    );

    Ok(meta)
}
