/// Errors from an [`crate::ObjectStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("Object not found: {key}")]
    NotFound { key: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors from the fetch-and-convert operation.
///
/// Any failure aborts the whole operation; partial success is not a
/// valid outcome and nothing is cached.
#[derive(Debug, thiserror::Error)]
pub enum StorageFetchError {
    #[error("Download failed: {0}")]
    Download(#[from] ObjectStoreError),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}
