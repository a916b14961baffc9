//! SPARQL endpoint client and binding flattening.
//!
//! The client is constructed once at process start and injected wherever
//! the gateway is needed; there is no module-level session state. One
//! multiple-results policy applies to every one-row query, replacing the
//! per-call-site divergence of earlier systems.

use serde::Serialize;

use crate::error::SparqlError;
use crate::queries;
use crate::response::{self, Binding, SparqlResponse};

/// What to do when a query expected to bind one row binds several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultipleResults {
    /// Treat extra rows as a fatal upstream inconsistency (default).
    #[default]
    FailFast,
    /// Log a warning and take the first row.
    FirstWins,
}

/// Flattened experiment-type query row.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentTypeRow {
    pub platform: String,
    pub release_date: String,
    pub experiment_type_label: String,
}

/// Flattened sample query row.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub age_label: String,
    pub sex: String,
    pub organism_label: String,
    pub local_id: String,
}

/// Combined experiment metadata consumed by the ingest write path.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentMetadata {
    pub experiment_id: String,
    pub platform: String,
    pub experiment_type_label: String,
    pub release_date: String,
    pub sex: String,
    pub organism_label: String,
    pub age_label: String,
}

/// Flattened image query row, with the derived object-storage key.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRow {
    pub image_name: String,
    pub external_image_id: String,
    pub s3_key: String,
    pub magnification: String,
    pub x_scaling: String,
    pub y_scaling: String,
}

/// Flattened probe query row.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeRow {
    pub probe_label: String,
    pub color: String,
}

/// Client for the consortium SPARQL endpoint.
pub struct SparqlClient {
    http: reqwest::Client,
    endpoint: String,
    on_multiple: MultipleResults,
}

impl SparqlClient {
    /// Create a client for `endpoint` with the given duplicate-row policy.
    pub fn new(endpoint: impl Into<String>, on_multiple: MultipleResults) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            on_multiple,
        }
    }

    /// Submit a query and return the raw binding rows.
    async fn query(&self, query: &str) -> Result<Vec<Binding>, SparqlError> {
        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("query", query), ("format", "json")])
            .send()
            .await?
            .error_for_status()?;

        let envelope: SparqlResponse = response
            .json()
            .await
            .map_err(|e| SparqlError::Decode(e.to_string()))?;

        Ok(envelope.results.bindings)
    }

    /// Submit a per-experiment query template.
    async fn query_by_experiment(
        &self,
        template: &str,
        experiment_id: &str,
    ) -> Result<Vec<Binding>, SparqlError> {
        self.query(&queries::for_experiment(template, experiment_id))
            .await
    }

    /// List external identifiers of all experiments that have an image.
    ///
    /// No restriction is placed on the image type.
    pub async fn list_experiments_with_images(&self) -> Result<Vec<String>, SparqlError> {
        let bindings = self.query(queries::ALL_EXPERIMENTS_WITH_IMAGE).await?;
        bindings
            .iter()
            .map(|b| {
                let uri = response::var(b, "experiment")?;
                response::fragment_after(uri, "#").map(str::to_string)
            })
            .collect()
    }

    /// Fetch platform / release date / experiment type for one experiment.
    pub async fn experiment_type(
        &self,
        experiment_id: &str,
    ) -> Result<ExperimentTypeRow, SparqlError> {
        let bindings = self
            .query_by_experiment(queries::GET_EXPERIMENT_TYPE_BY_EXPERIMENT, experiment_id)
            .await?;
        let row = select_single(&bindings, self.on_multiple, "experiment type query")?;
        Ok(ExperimentTypeRow {
            platform: response::var(row, "platform")?.to_string(),
            release_date: response::var(row, "release_date")?.to_string(),
            experiment_type_label: response::var(row, "experiment_type_label")?.to_string(),
        })
    }

    /// Fetch sample (donor) attributes for one experiment.
    ///
    /// `sex` is lowercased on the way through so downstream records are
    /// uniform.
    pub async fn sample(&self, experiment_id: &str) -> Result<SampleRow, SparqlError> {
        let bindings = self
            .query_by_experiment(queries::GET_SAMPLE_BY_EXPERIMENT, experiment_id)
            .await?;
        let row = select_single(&bindings, self.on_multiple, "sample query")?;
        Ok(SampleRow {
            age_label: response::var(row, "age_label")?.to_string(),
            sex: response::var(row, "sex")?.to_lowercase(),
            organism_label: response::var(row, "organism_label")?.to_string(),
            local_id: response::var(row, "local_id")?.to_string(),
        })
    }

    /// Combined metadata for the experiment write path.
    pub async fn experiment_metadata(
        &self,
        experiment_id: &str,
    ) -> Result<ExperimentMetadata, SparqlError> {
        let types = self.experiment_type(experiment_id).await?;
        let sample = self.sample(experiment_id).await?;
        Ok(ExperimentMetadata {
            experiment_id: experiment_id.to_string(),
            platform: types.platform,
            experiment_type_label: types.experiment_type_label,
            release_date: types.release_date,
            sex: sample.sex,
            organism_label: sample.organism_label,
            age_label: sample.age_label,
        })
    }

    /// All image files attached to one experiment, with derived storage
    /// keys.
    pub async fn images_by_experiment(
        &self,
        experiment_id: &str,
    ) -> Result<Vec<ImageRow>, SparqlError> {
        let bindings = self
            .query_by_experiment(queries::GET_IMAGES_BY_EXPERIMENT, experiment_id)
            .await?;
        bindings
            .iter()
            .map(|b| {
                let filename = response::var(b, "img_file")?;
                let experiment_uri = response::var(b, "experiment")?;
                let image_uri = response::var(b, "image")?;
                Ok(ImageRow {
                    image_name: filename.to_string(),
                    external_image_id: response::fragment_after(image_uri, "owl#")?.to_string(),
                    s3_key: response::s3_key_for(experiment_uri, filename)?,
                    magnification: response::var(b, "magnification")?.to_string(),
                    x_scaling: response::var(b, "x_scaling")?.to_string(),
                    y_scaling: response::var(b, "y_scaling")?.to_string(),
                })
            })
            .collect()
    }

    /// Probes used by one experiment, with stain colors.
    pub async fn probes_by_experiment(
        &self,
        experiment_id: &str,
    ) -> Result<Vec<ProbeRow>, SparqlError> {
        let bindings = self
            .query_by_experiment(queries::GET_PROBES_BY_EXPERIMENT, experiment_id)
            .await?;
        bindings
            .iter()
            .map(|b| {
                Ok(ProbeRow {
                    probe_label: response::var(b, "probe_label")?.to_string(),
                    color: response::var(b, "color")?.to_string(),
                })
            })
            .collect()
    }
}

/// Apply the multiple-results policy to a query expected to bind one row.
fn select_single<'b>(
    bindings: &'b [Binding],
    policy: MultipleResults,
    context: &str,
) -> Result<&'b Binding, SparqlError> {
    match bindings {
        [] => Err(SparqlError::NoResults {
            context: context.to_string(),
        }),
        [single] => Ok(single),
        [first, ..] => match policy {
            MultipleResults::FailFast => Err(SparqlError::TooManyResults {
                context: context.to_string(),
                count: bindings.len(),
            }),
            MultipleResults::FirstWins => {
                tracing::warn!(
                    context,
                    count = bindings.len(),
                    "Multiple bindings for one-row query, taking the first"
                );
                Ok(first)
            }
        },
    }
}
