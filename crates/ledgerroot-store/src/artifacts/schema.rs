//! Tree artifact schema and load-time validation

#![allow(clippy::result_large_err)]

use crate::errors::{corrupt_artifact, Result};
use ledgerroot_core::errors::LedgerError;
use ledgerroot_core::{
    Amount, Hash32, Identity, Leaf, MerkleTree, HASH_ALGORITHM, LEAF_ENCODING,
};
use serde::{Deserialize, Serialize};

pub const TREE_FILE: &str = "tree.json";
pub const PROOFS_FILE: &str = "proofs.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Format tag of the tree artifact
pub const TREE_FORMAT: &str = "ledgerroot-sorted-pair-v1";

/// One entry of `values`, in tree order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRecord {
    pub tree_index: usize,
    pub identity: Identity,
    pub amount: Amount,
}

/// Serialized form of a [`MerkleTree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub format: String,
    pub hash_algorithm: String,
    pub leaf_encoding: String,
    pub root: Hash32,
    pub leaf_count: usize,
    pub levels: Vec<Vec<Hash32>>,
    pub values: Vec<ValueRecord>,
}

impl TreeArtifact {
    pub fn from_tree(tree: &MerkleTree) -> Self {
        Self {
            format: TREE_FORMAT.to_string(),
            hash_algorithm: HASH_ALGORITHM.to_string(),
            leaf_encoding: LEAF_ENCODING.to_string(),
            root: tree.root(),
            leaf_count: tree.leaf_count(),
            levels: tree.levels().to_vec(),
            values: tree
                .leaves()
                .iter()
                .enumerate()
                .map(|(tree_index, leaf)| ValueRecord {
                    tree_index,
                    identity: leaf.identity,
                    amount: leaf.amount,
                })
                .collect(),
        }
    }

    /// Validate every field against a recomputation and rebuild the tree
    ///
    /// # Errors
    ///
    /// Returns `CorruptArtifact` when the header, counts, leaf hashes, levels
    /// or root disagree with what the values produce.
    pub fn into_tree(self) -> Result<MerkleTree> {
        if self.format != TREE_FORMAT {
            return Err(corrupt_artifact(
                TREE_FILE,
                &format!("unknown format '{}'", self.format),
            ));
        }
        if self.hash_algorithm != HASH_ALGORITHM {
            return Err(corrupt_artifact(
                TREE_FILE,
                &format!("unsupported hash algorithm '{}'", self.hash_algorithm),
            ));
        }
        if self.leaf_count != self.values.len() {
            return Err(corrupt_artifact(
                TREE_FILE,
                &format!(
                    "leaf_count {} but {} values",
                    self.leaf_count,
                    self.values.len()
                ),
            ));
        }
        if let Some(v) = self
            .values
            .iter()
            .enumerate()
            .find(|(i, v)| v.tree_index != *i)
        {
            return Err(corrupt_artifact(
                TREE_FILE,
                &format!("value at position {} has tree_index {}", v.0, v.1.tree_index),
            ));
        }

        let leaves: Vec<Leaf> = self
            .values
            .iter()
            .map(|v| Leaf::new(v.identity, v.amount))
            .collect();
        if let Some((i, _)) = leaves
            .iter()
            .zip(self.levels.first().into_iter().flatten())
            .enumerate()
            .find(|(_, (leaf, stored))| leaf.leaf_hash != **stored)
        {
            return Err(corrupt_artifact(
                TREE_FILE,
                &format!("leaf hash at index {} does not match its value", i),
            ));
        }

        let tree = MerkleTree::from_parts(leaves, self.levels).map_err(|e| match e {
            LedgerError::CorruptTree { reason } => corrupt_artifact(TREE_FILE, &reason),
            other => corrupt_artifact(TREE_FILE, &other.to_string()),
        })?;

        if tree.root() != self.root {
            return Err(corrupt_artifact(
                TREE_FILE,
                &format!("root {} does not match levels ({})", self.root, tree.root()),
            ));
        }
        Ok(tree)
    }
}
