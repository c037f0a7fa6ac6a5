//! Build manifest and its digests
//!
//! - **File digest**: SHA-256 of an artifact's exact bytes
//! - **Semantic digest**: SHA-256 of the manifest with `created_at` and the
//!   semantic digest itself blanked, stable across re-runs of the same build

#![allow(clippy::result_large_err)]

use crate::errors::{serialization_error, Result};
use ledgerroot_core::{Amount, Hash32};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata binding one build's artifacts together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    /// RFC 3339, UTC
    pub created_at: String,
    pub root: Hash32,
    pub leaf_count: usize,
    /// Sum of leaf amounts; `null` when it exceeds `2^256 - 1`
    pub total_amount: Option<Amount>,
    pub hash_algorithm: String,
    pub tree_digest: String,
    pub proofs_digest: String,
    pub semantic_digest: String,
}

/// Hex SHA-256 of raw artifact bytes
pub fn compute_file_digest(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Digest of the manifest with time-dependent fields blanked
pub fn compute_semantic_digest(manifest: &BuildManifest) -> Result<String> {
    let mut manifest_copy = manifest.clone();
    manifest_copy.created_at = String::new();
    manifest_copy.semantic_digest = String::new();

    let canonical = serde_json::to_string(&manifest_copy)
        .map_err(|e| serialization_error("compute_semantic_digest", e))?;
    Ok(compute_file_digest(canonical.as_bytes()))
}
