//! Object-storage fetcher.
//!
//! Downloads image binaries by storage key, converts them to the
//! canonical archival TIFF plus a JPEG preview, and computes the SHA-1
//! content hash used as the cache-validity marker. The store itself is
//! an injected [`ObjectStore`] value with its own lifecycle; there is no
//! module-level client state.

pub mod convert;
pub mod error;
pub mod store;

pub use convert::{fetch_and_convert, FetchedImage};
pub use error::{ObjectStoreError, StorageFetchError};
pub use store::{MemoryObjectStore, ObjectStore, S3ObjectStore};
