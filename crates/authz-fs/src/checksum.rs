//! SHA-256 checksum utilities
//!
//! Reports carry the checksum of rendered text in the canonical
//! `sha256:<hex>` form so CI logs can be compared across runs.

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of raw bytes.
pub fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    compute_checksum(content.as_bytes())
}
