//! Ingest and training pipelines.
//!
//! Composes the knowledge-graph gateway, metadata store, and domain
//! logic: `ingest` populates experiments/image sets/images/probes from
//! the remote endpoint, `train` fits a classifier from every annotated
//! subregion in an image set. Both run synchronously in the calling
//! task; there is no background queue.

pub mod error;
pub mod ingest;
pub mod train;

pub use error::{IngestError, TrainError};
pub use ingest::{ingest_experiment, IngestSummary};
pub use train::train_image_set;
