//! Per-subregion feature extraction.
//!
//! A subregion's feature vector summarizes the HSV pixel statistics of
//! the polygon interior: per-channel mean, standard deviation, and an
//! 8-bin histogram. The vector length is fixed so every annotation in a
//! training set lines up column-for-column.
//!
//! Degenerate polygons (empty rasterized interior) yield an all-zero
//! vector rather than an error; the trainer decides what to do with a
//! set that contains nothing but zeros.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::polygon::{self, Vertex};

/// Histogram bins per HSV channel.
pub const HIST_BINS: usize = 8;

/// Features per channel: mean, standard deviation, and the histogram.
const PER_CHANNEL: usize = 2 + HIST_BINS;

/// Total feature vector length (three HSV channels).
pub const FEATURE_LEN: usize = 3 * PER_CHANNEL;

/// One labeled training example: the feature vector for a single
/// subregion plus its anatomy label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    pub label: String,
    pub features: Vec<f64>,
}

/// Convert an 8-bit RGB pixel to HSV with all channels scaled to [0, 1].
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [f64; 3] {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        (((g - b) / delta).rem_euclid(6.0)) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    [hue, saturation, max]
}

/// Extract the feature vector for the polygon interior of `image`,
/// tagged with `label`.
pub fn extract(image: &RgbImage, vertices: &[Vertex], label: &str) -> TrainingExample {
    let pixels = polygon::rasterize(vertices, image.width(), image.height());

    if pixels.is_empty() {
        tracing::warn!(
            label,
            vertex_count = vertices.len(),
            "Polygon rasterized to zero pixels, emitting zero feature vector"
        );
        return TrainingExample {
            label: label.to_string(),
            features: vec![0.0; FEATURE_LEN],
        };
    }

    let hsv: Vec<[f64; 3]> = pixels
        .iter()
        .map(|&(x, y)| {
            let p = image.get_pixel(x, y);
            rgb_to_hsv(p[0], p[1], p[2])
        })
        .collect();

    let mut features = Vec::with_capacity(FEATURE_LEN);
    for channel in 0..3 {
        let values: Vec<f64> = hsv.iter().map(|px| px[channel]).collect();
        features.extend(channel_features(&values));
    }

    TrainingExample {
        label: label.to_string(),
        features,
    }
}

/// Mean, standard deviation, and normalized histogram for one channel.
fn channel_features(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let mut hist = vec![0.0; HIST_BINS];
    for &v in values {
        // Values are in [0, 1]; clamp so v == 1.0 lands in the last bin.
        let bin = ((v * HIST_BINS as f64) as usize).min(HIST_BINS - 1);
        hist[bin] += 1.0;
    }
    for count in &mut hist {
        *count /= n;
    }

    let mut out = vec![mean, std_dev];
    out.extend(hist);
    out
}
