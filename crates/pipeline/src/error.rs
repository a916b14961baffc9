use lungmap_core::error::CoreError;
use lungmap_core::types::DbId;
use lungmap_sparql::SparqlError;

/// Errors from the experiment ingest pipeline.
///
/// Upstream query errors are fatal to the triggering ingest; the
/// surrounding transaction leaves no partial rows behind.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Sparql(#[from] SparqlError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Errors from the model training pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("Image set {0} not found")]
    ImageSetNotFound(DbId),

    #[error("Image set {image_set_id} has no annotated subregions to train from")]
    NoTrainingData { image_set_id: DbId },

    #[error("Image {image_id} has annotations but no cached archival binary")]
    MissingCache { image_id: DbId },

    #[error("Failed to decode cached binary for image {image_id}: {source}")]
    Decode {
        image_id: DbId,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}
