//! Domain logic shared across the LungMAP analytics backend.
//!
//! Pure computation only: no database or network access. The heavier
//! pieces are polygon rasterization, per-subregion feature extraction,
//! and the classification pipeline trained from curator annotations.

pub mod classifier;
pub mod error;
pub mod features;
pub mod hashing;
pub mod polygon;
pub mod types;
