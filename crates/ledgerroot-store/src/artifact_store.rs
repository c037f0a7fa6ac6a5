//! Directory-backed artifact store
//!
//! One output directory holds exactly one build: `tree.json`, `proofs.json`
//! and `manifest.json`. Rendering is pure; persisting replaces all three files
//! together or not at all.

#![allow(clippy::result_large_err)]

use crate::artifacts::{
    compute_file_digest, compute_semantic_digest, BuildManifest, TreeArtifact, MANIFEST_FILE,
    PROOFS_FILE, TREE_FILE,
};
use crate::errors::{corrupt_artifact, io_error, serialization_error, Result};
use crate::fs::atomic_write_all;
use chrono::{DateTime, SecondsFormat, Utc};
use ledgerroot_core::{MerkleTree, Proof, HASH_ALGORITHM};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialized artifact bytes for one build, ready to persist
#[derive(Debug, Clone)]
pub struct RenderedArtifacts {
    pub tree_json: Vec<u8>,
    pub proofs_json: Vec<u8>,
    pub manifest: BuildManifest,
}

/// Outcome of [`ArtifactStore::persist`]
#[derive(Debug, Clone)]
pub struct PersistOutcome {
    /// Manifest now on disk (the previous one when unchanged)
    pub manifest: BuildManifest,
    /// The directory already held a build with the same semantic digest
    pub unchanged: bool,
}

fn to_pretty_bytes<T: Serialize>(op: &str, value: &T) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| serialization_error(op, e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tree_path(&self) -> PathBuf {
        self.dir.join(TREE_FILE)
    }

    pub fn proofs_path(&self) -> PathBuf {
        self.dir.join(PROOFS_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// Serialize a tree and its proofs and compute the manifest
    ///
    /// Output bytes depend only on the leaf set; `created_at` only appears in
    /// the manifest.
    pub fn render(
        tree: &MerkleTree,
        proofs: &[Proof],
        created_at: DateTime<Utc>,
    ) -> Result<RenderedArtifacts> {
        let tree_json = to_pretty_bytes("render_tree", &TreeArtifact::from_tree(tree))?;
        let proofs_json = to_pretty_bytes("render_proofs", &proofs)?;
        let total_amount = tree.total_amount();
        if total_amount.is_none() {
            tracing::debug!(
                leaf_count = tree.leaf_count(),
                "Leaf amount total exceeds 256 bits; manifest total left empty"
            );
        }

        let mut manifest = BuildManifest {
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            root: tree.root(),
            leaf_count: tree.leaf_count(),
            total_amount,
            hash_algorithm: HASH_ALGORITHM.to_string(),
            tree_digest: compute_file_digest(&tree_json),
            proofs_digest: compute_file_digest(&proofs_json),
            semantic_digest: String::new(),
        };
        manifest.semantic_digest = compute_semantic_digest(&manifest)?;

        Ok(RenderedArtifacts {
            tree_json,
            proofs_json,
            manifest,
        })
    }

    /// Write a rendered build unless the directory already holds it
    pub fn persist(&self, rendered: &RenderedArtifacts) -> Result<PersistOutcome> {
        if let Some(existing) = self.load_manifest()? {
            if existing.semantic_digest == rendered.manifest.semantic_digest
                && self.digests_match(&existing)?
            {
                tracing::debug!(
                    dir = %self.dir.display(),
                    semantic_digest = %existing.semantic_digest,
                    "Artifacts unchanged; skipping write"
                );
                return Ok(PersistOutcome {
                    manifest: existing,
                    unchanged: true,
                });
            }
        }

        let manifest_json = to_pretty_bytes("render_manifest", &rendered.manifest)?;
        atomic_write_all(&[
            (self.tree_path(), rendered.tree_json.clone()),
            (self.proofs_path(), rendered.proofs_json.clone()),
            (self.manifest_path(), manifest_json),
        ])?;

        tracing::debug!(
            dir = %self.dir.display(),
            tree_bytes = rendered.tree_json.len(),
            proofs_bytes = rendered.proofs_json.len(),
            "Persisted artifacts"
        );

        Ok(PersistOutcome {
            manifest: rendered.manifest.clone(),
            unchanged: false,
        })
    }

    fn read_file(&self, path: &Path, op: &str) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| io_error(op, e))
    }

    /// Load and fully validate `tree.json`
    pub fn load_tree(&self) -> Result<MerkleTree> {
        let bytes = self.read_file(&self.tree_path(), "load_tree")?;
        let artifact: TreeArtifact = serde_json::from_slice(&bytes)
            .map_err(|e| corrupt_artifact(TREE_FILE, &e.to_string()))?;
        artifact.into_tree()
    }

    pub fn load_proofs(&self) -> Result<Vec<Proof>> {
        let bytes = self.read_file(&self.proofs_path(), "load_proofs")?;
        serde_json::from_slice(&bytes).map_err(|e| corrupt_artifact(PROOFS_FILE, &e.to_string()))
    }

    /// `None` when no build has been persisted yet
    pub fn load_manifest(&self) -> Result<Option<BuildManifest>> {
        let path = self.manifest_path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = self.read_file(&path, "load_manifest")?;
        let manifest: BuildManifest = serde_json::from_slice(&bytes)
            .map_err(|e| corrupt_artifact(MANIFEST_FILE, &e.to_string()))?;
        Ok(Some(manifest))
    }

    fn digests_match(&self, manifest: &BuildManifest) -> Result<bool> {
        for (path, expected) in [
            (self.tree_path(), &manifest.tree_digest),
            (self.proofs_path(), &manifest.proofs_digest),
        ] {
            if !path.exists() {
                return Ok(false);
            }
            let bytes = self.read_file(&path, "check_digest")?;
            if compute_file_digest(&bytes) != *expected {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Check the on-disk files against the manifest's digests
    ///
    /// # Errors
    ///
    /// Returns `CorruptArtifact` when the manifest is missing, unreadable or
    /// no longer describes the tree and proof files.
    pub fn verify_integrity(&self) -> Result<BuildManifest> {
        let manifest = self
            .load_manifest()?
            .ok_or_else(|| corrupt_artifact(MANIFEST_FILE, "missing"))?;
        if compute_semantic_digest(&manifest)? != manifest.semantic_digest {
            return Err(corrupt_artifact(MANIFEST_FILE, "semantic digest mismatch"));
        }
        if !self.digests_match(&manifest)? {
            return Err(corrupt_artifact(
                MANIFEST_FILE,
                "tree or proof file digest does not match",
            ));
        }
        Ok(manifest)
    }
}
