use crate::canonical::CanonicalTree;
use crate::types::Checksum;
use sha2::{Digest, Sha256};

/// Compute the fingerprint of a canonical tree.
///
/// Serializes with the fixed key order the canonicalizer established and
/// hashes the bytes with SHA-256, returning lowercase hex. Byte-identical
/// trees yield identical digests across processes, machines, and time.
/// Nothing is cached; every call serializes and hashes fresh.
pub fn digest(tree: &CanonicalTree) -> Result<Checksum, serde_json::Error> {
    let canonical = tree.canonical_json()?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(Checksum::new(hex::encode(hasher.finalize())))
}

/// Recompute the digest and compare against an expected checksum.
///
/// A mismatch is a normal `false`, never an error.
pub fn verify(tree: &CanonicalTree, expected: &Checksum) -> Result<bool, serde_json::Error> {
    Ok(digest(tree)? == *expected)
}
