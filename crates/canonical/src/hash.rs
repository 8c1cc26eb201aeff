//! Document digests.
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
//! ```
//!
//! Two documents with the same digest normalize to the same token stream,
//! which lets callers spot whole-document copies without running the
//! fingerprint pipeline.

use sha2::{Digest, Sha256};

/// Compute the identity digest for canonical text under a config version.
///
/// ```rust
/// use canonical::hash_canonical_bytes;
///
/// assert_ne!(hash_canonical_bytes(1, b"a b"), hash_canonical_bytes(2, b"a b"));
/// ```
pub fn hash_canonical_bytes(canonical_version: u32, canonical_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0]);
    hasher.update(canonical_bytes);
    hex::encode(hasher.finalize())
}
