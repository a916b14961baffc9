//! Classification pipeline trained from labeled subregion features.
//!
//! The pipeline composes feature standardization with a nearest-centroid
//! multi-class classifier, fitted and applied as a single unit. A fitted
//! pipeline serializes to an opaque JSON byte blob; that blob is the
//! `trained_models.model_object` column and is only ever read back
//! through [`Pipeline::from_bytes`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::features::TrainingExample;

/// Per-feature standardization (zero mean, unit variance).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StandardScaler {
    means: Vec<f64>,
    std_devs: Vec<f64>,
}

impl StandardScaler {
    fn fit(rows: &[&[f64]]) -> Self {
        let dims = rows[0].len();
        let n = rows.len() as f64;

        let mut means = vec![0.0; dims];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut std_devs = vec![0.0; dims];
        for row in rows {
            for (s, (v, m)) in std_devs.iter_mut().zip(row.iter().zip(means.iter())) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut std_devs {
            *s = (*s / n).sqrt();
            // Constant features pass through unscaled instead of dividing
            // by zero.
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Self { means, std_devs }
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.std_devs.iter()))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }
}

/// One class centroid in standardized feature space.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Centroid {
    label: String,
    center: Vec<f64>,
}

/// A fitted classification pipeline: scaler plus nearest-centroid model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    scaler: StandardScaler,
    centroids: Vec<Centroid>,
}

impl Pipeline {
    /// Fit the pipeline on the full labeled dataset.
    ///
    /// Errors on an empty dataset or on examples with inconsistent
    /// feature vector lengths.
    pub fn fit(examples: &[TrainingExample]) -> Result<Self, CoreError> {
        if examples.is_empty() {
            return Err(CoreError::Validation(
                "cannot fit a classifier on zero training examples".to_string(),
            ));
        }
        let dims = examples[0].features.len();
        if examples.iter().any(|e| e.features.len() != dims) {
            return Err(CoreError::Validation(
                "training examples have inconsistent feature vector lengths".to_string(),
            ));
        }

        let rows: Vec<&[f64]> = examples.iter().map(|e| e.features.as_slice()).collect();
        let scaler = StandardScaler::fit(&rows);

        // Group standardized rows by label and average them.
        let mut labels: Vec<String> = examples.iter().map(|e| e.label.clone()).collect();
        labels.sort();
        labels.dedup();

        let mut centroids = Vec::with_capacity(labels.len());
        for label in labels {
            let members: Vec<Vec<f64>> = examples
                .iter()
                .filter(|e| e.label == label)
                .map(|e| scaler.transform(&e.features))
                .collect();
            let count = members.len() as f64;
            let mut center = vec![0.0; dims];
            for row in &members {
                for (c, v) in center.iter_mut().zip(row.iter()) {
                    *c += v;
                }
            }
            for c in &mut center {
                *c /= count;
            }
            centroids.push(Centroid { label, center });
        }

        tracing::debug!(
            classes = centroids.len(),
            examples = examples.len(),
            dims,
            "Fitted classification pipeline"
        );

        Ok(Self { scaler, centroids })
    }

    /// Predict the label for a raw (unstandardized) feature vector.
    pub fn predict(&self, features: &[f64]) -> &str {
        let standardized = self.scaler.transform(features);
        let nearest = self
            .centroids
            .iter()
            .min_by(|a, b| {
                squared_distance(&a.center, &standardized)
                    .total_cmp(&squared_distance(&b.center, &standardized))
            })
            .expect("fitted pipeline has at least one centroid");
        &nearest.label
    }

    /// Class labels known to this pipeline, sorted.
    pub fn labels(&self) -> Vec<&str> {
        self.centroids.iter().map(|c| c.label.as_str()).collect()
    }

    /// Serialize the fitted pipeline to an opaque byte blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self)
            .map_err(|e| CoreError::Internal(format!("failed to serialize pipeline: {e}")))
    }

    /// Deserialize a pipeline previously produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Internal(format!("failed to deserialize pipeline: {e}")))
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}
