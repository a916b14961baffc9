//! SHA-1 hex digest utility.
//!
//! The digest is a cache-validity marker for fetched image binaries,
//! not a security boundary.

use sha1::{Digest, Sha1};

/// Compute a SHA-1 hex digest (40 characters) of the given bytes.
pub fn sha1_hex(data: &[u8]) -> String {
    let hash = Sha1::digest(data);
    format!("{hash:x}")
}
