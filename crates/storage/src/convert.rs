//! Fetch-and-convert: download, decode, re-encode, hash.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;

use lungmap_core::hashing::sha1_hex;

use crate::error::StorageFetchError;
use crate::store::ObjectStore;

/// JPEG preview quality.
const PREVIEW_QUALITY: u8 = 90;

/// The three outputs of a successful fetch-and-convert, returned
/// together: lossless archival bytes, their content hash, and the lossy
/// preview.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub archival_tiff: Vec<u8>,
    pub sha1_hex: String,
    pub preview_jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Download the object at `key`, decode it as a raster image, normalize
/// to 8-bit RGB channel order, and re-encode as archival TIFF plus JPEG
/// preview with a SHA-1 digest over the archival bytes.
///
/// All-or-nothing: any download, decode, or encode failure aborts the
/// operation. Concurrent calls for the same key may race and fetch
/// redundantly; the result is deterministic either way, so no per-key
/// locking is done here.
pub async fn fetch_and_convert(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<FetchedImage, StorageFetchError> {
    let raw = store.get(key).await?;

    let decoded = image::load_from_memory(&raw).map_err(StorageFetchError::Decode)?;
    // Canonical display channel order, regardless of what the storage
    // format used natively.
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut archival = Cursor::new(Vec::new());
    rgb.write_to(&mut archival, ImageFormat::Tiff)
        .map_err(StorageFetchError::Encode)?;
    let archival_tiff = archival.into_inner();

    let mut preview = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut preview, PREVIEW_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(StorageFetchError::Encode)?;
    let preview_jpeg = preview.into_inner();

    let sha1_hex = sha1_hex(&archival_tiff);

    tracing::info!(
        key,
        width,
        height,
        archival_bytes = archival_tiff.len(),
        preview_bytes = preview_jpeg.len(),
        sha1 = %sha1_hex,
        "Fetched and converted image"
    );

    Ok(FetchedImage {
        archival_tiff,
        sha1_hex,
        preview_jpeg,
        width,
        height,
    })
}
