//! Content digests and record identifiers.
//!
//! A record stores the SHA-256 hex digest of its off-chain content next to the
//! content pointer, so readers can check what they fetched from IPFS.

#[cfg(feature = "sha256")]
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `content`. Always 64 characters.
#[cfg(feature = "sha256")]
pub fn content_digest_hex(content: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(content);
    hex::encode(h.finalize())
}

/// Check `content` against a stored digest, ignoring hex case.
#[cfg(feature = "sha256")]
pub fn digest_matches(content: &[u8], expected_hex: &str) -> bool {
    content_digest_hex(content).eq_ignore_ascii_case(expected_hex.trim())
}

/// Fresh record id: a random v4 UUID without dashes (32 lowercase hex chars).
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
