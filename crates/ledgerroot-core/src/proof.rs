//! ProofGenerator: sibling-hash paths from a leaf to the root

use crate::errors::{LedgerError, Result};
use crate::model::{Amount, Hash32, Identity};
use crate::tree::MerkleTree;
use serde::{Deserialize, Serialize};

/// Inclusion proof for one entry
///
/// `path` runs leaf-to-root and holds only sibling hashes; levels where the
/// node was promoted contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub identity: Identity,
    pub amount: Amount,
    pub path: Vec<Hash32>,
}

/// Generates proofs against a built tree
pub struct ProofGenerator<'a> {
    tree: &'a MerkleTree,
}

impl<'a> ProofGenerator<'a> {
    pub fn new(tree: &'a MerkleTree) -> Self {
        Self { tree }
    }

    /// Proof for the leaf holding `identity`
    ///
    /// # Errors
    ///
    /// Returns `LeafNotFound` when the identity is not in the tree.
    pub fn proof_for(&self, identity: &Identity) -> Result<Proof> {
        let index = self
            .tree
            .position_of(identity)
            .ok_or_else(|| LedgerError::LeafNotFound {
                identity: identity.to_hex(),
            })?;
        self.proof_at(index)
    }

    /// Proof for the leaf at tree index `index`
    ///
    /// # Errors
    ///
    /// Returns `LeafIndexOutOfRange` when `index >= leaf_count`.
    pub fn proof_at(&self, index: usize) -> Result<Proof> {
        let leaf = self
            .tree
            .leaf(index)
            .ok_or(LedgerError::LeafIndexOutOfRange {
                index,
                leaf_count: self.tree.leaf_count(),
            })?;
        Ok(Proof {
            identity: leaf.identity,
            amount: leaf.amount,
            path: self.path_at(index),
        })
    }

    /// Every proof, in tree order
    pub fn all_proofs(&self) -> Vec<Proof> {
        self.tree
            .leaves()
            .iter()
            .enumerate()
            .map(|(index, leaf)| Proof {
                identity: leaf.identity,
                amount: leaf.amount,
                path: self.path_at(index),
            })
            .collect()
    }

    fn path_at(&self, mut index: usize) -> Vec<Hash32> {
        let levels = self.tree.levels();
        let mut path = Vec::with_capacity(self.tree.depth());
        for level in &levels[..levels.len().saturating_sub(1)] {
            if let Some(sibling) = level.get(index ^ 1) {
                path.push(*sibling);
            }
            index /= 2;
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LedgerEntry;
    use crate::tree::TreeBuilder;

    fn tree_of(n: u8) -> MerkleTree {
        let entries: Vec<_> = (0..n)
            .map(|i| LedgerEntry::new(Identity::new([i; 20]), Amount::from(u64::from(i) + 1)))
            .collect();
        TreeBuilder::new().build(&entries).unwrap()
    }

    #[test]
    fn test_single_leaf_has_empty_path() {
        let tree = tree_of(1);
        let proof = ProofGenerator::new(&tree).proof_at(0).unwrap();
        assert!(proof.path.is_empty());
    }

    #[test]
    fn test_path_lengths_for_five_leaves() {
        // levels 5 -> 3 -> 2 -> 1; index 4 is promoted twice
        let tree = tree_of(5);
        let gen = ProofGenerator::new(&tree);
        let lens: Vec<usize> = gen.all_proofs().iter().map(|p| p.path.len()).collect();
        assert_eq!(lens, vec![3, 3, 3, 3, 1]);
    }

    #[test]
    fn test_unknown_identity_is_not_found() {
        let tree = tree_of(3);
        let err = ProofGenerator::new(&tree)
            .proof_for(&Identity::new([0xee; 20]))
            .unwrap_err();
        assert!(matches!(err, LedgerError::LeafNotFound { .. }));
    }

    #[test]
    fn test_index_out_of_range() {
        let tree = tree_of(3);
        assert_eq!(
            ProofGenerator::new(&tree).proof_at(3),
            Err(LedgerError::LeafIndexOutOfRange {
                index: 3,
                leaf_count: 3
            })
        );
    }

    #[test]
    fn test_proof_for_matches_proof_at() {
        let tree = tree_of(6);
        let gen = ProofGenerator::new(&tree);
        let identity = tree.leaves()[2].identity;
        assert_eq!(gen.proof_for(&identity).unwrap(), gen.proof_at(2).unwrap());
    }
}
