//! TreeBuilder: canonical sorted-pair Merkle tree over a leaf set

use crate::errors::{LedgerError, Result};
use crate::hashing::hash_pair;
use crate::leaf::Leaf;
use crate::model::{Amount, Hash32, Identity, LedgerEntry};
use std::collections::HashMap;

/// Minimum number of leaves per rayon task
#[cfg(feature = "parallel")]
const PAR_MIN_LEN: usize = 1024;

/// Builds a [`MerkleTree`] from a ledger
///
/// The result depends only on the set of entries, never on their input order.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    parallel: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Builder with parallel leaf hashing when the `parallel` feature is on
    pub fn new() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Toggle parallel leaf hashing (ignored without the `parallel` feature)
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Encode every entry and build the tree
    ///
    /// # Errors
    ///
    /// - `EmptyLedger` when `entries` is empty
    /// - `DuplicateIdentity` when any identity occurs more than once
    pub fn build(&self, entries: &[LedgerEntry]) -> Result<MerkleTree> {
        if entries.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        tracing::debug!(
            entries = entries.len(),
            parallel = self.parallel,
            "Encoding leaves"
        );
        let leaves = self.encode_all(entries);
        Self::build_from_leaves(leaves)
    }

    /// Build from already encoded leaves
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::build`].
    pub fn build_from_leaves(mut leaves: Vec<Leaf>) -> Result<MerkleTree> {
        if leaves.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }

        leaves.sort_by(|a, b| {
            a.leaf_hash
                .cmp(&b.leaf_hash)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        check_duplicates(&leaves)?;

        let base: Vec<Hash32> = leaves.iter().map(|l| l.leaf_hash).collect();
        let levels = build_levels(base);
        let index = leaves
            .iter()
            .enumerate()
            .map(|(i, leaf)| (leaf.identity, i))
            .collect();

        Ok(MerkleTree {
            leaves,
            levels,
            index,
        })
    }

    fn encode_all(&self, entries: &[LedgerEntry]) -> Vec<Leaf> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            use rayon::prelude::*;
            return entries
                .par_iter()
                .with_min_len(PAR_MIN_LEN)
                .map(|e| Leaf::new(e.identity, e.amount))
                .collect();
        }
        entries
            .iter()
            .map(|e| Leaf::new(e.identity, e.amount))
            .collect()
    }
}

/// Full scan over sorted leaves; reports the first repeated identity in tree
/// order and the number of distinct repeated identities.
fn check_duplicates(sorted: &[Leaf]) -> Result<()> {
    let mut counts: HashMap<Identity, usize> = HashMap::with_capacity(sorted.len());
    for leaf in sorted {
        *counts.entry(leaf.identity).or_insert(0) += 1;
    }
    let duplicates = counts.values().filter(|c| **c > 1).count();
    if duplicates == 0 {
        return Ok(());
    }
    let first = sorted
        .iter()
        .find(|l| counts.get(&l.identity).copied().unwrap_or(0) > 1)
        .map(|l| l.identity.to_hex())
        .unwrap_or_default();
    Err(LedgerError::DuplicateIdentity {
        identity: first,
        duplicates,
    })
}

fn build_levels(base: Vec<Hash32>) -> Vec<Vec<Hash32>> {
    let mut levels = vec![base];
    while let Some(current) = levels.last() {
        if current.len() <= 1 {
            break;
        }
        let next = reduce_level(current);
        levels.push(next);
    }
    levels
}

/// Pair `(2i, 2i+1)`; a trailing odd node moves up unchanged
fn reduce_level(level: &[Hash32]) -> Vec<Hash32> {
    level
        .chunks(2)
        .map(|pair| match pair.get(1) {
            Some(right) => hash_pair(&pair[0], right),
            None => pair[0],
        })
        .collect()
}

/// A built commitment tree
///
/// `levels[0]` is the sorted leaf-hash list and the last level holds only the
/// root. `leaves[i]` is the entry whose hash sits at `levels[0][i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    leaves: Vec<Leaf>,
    levels: Vec<Vec<Hash32>>,
    index: HashMap<Identity, usize>,
}

impl MerkleTree {
    /// Reassemble a tree from persisted parts, re-deriving everything
    ///
    /// `leaves` must be in tree order and `levels` must match what the
    /// builder would produce for them.
    ///
    /// # Errors
    ///
    /// Returns `CorruptTree` on any disagreement, or the builder's errors for
    /// an empty or duplicated leaf set.
    pub fn from_parts(leaves: Vec<Leaf>, levels: Vec<Vec<Hash32>>) -> Result<Self> {
        for (i, leaf) in leaves.iter().enumerate() {
            let expected = Leaf::new(leaf.identity, leaf.amount).leaf_hash;
            if expected != leaf.leaf_hash {
                return Err(LedgerError::CorruptTree {
                    reason: format!("leaf {} hash does not match its entry", i),
                });
            }
        }
        let stated_order: Vec<Identity> = leaves.iter().map(|l| l.identity).collect();
        let rebuilt = TreeBuilder::build_from_leaves(leaves)?;

        let rebuilt_order: Vec<Identity> = rebuilt.leaves.iter().map(|l| l.identity).collect();
        if rebuilt_order != stated_order {
            return Err(LedgerError::CorruptTree {
                reason: "leaves are not in canonical order".to_string(),
            });
        }
        if rebuilt.levels.len() != levels.len() {
            return Err(LedgerError::CorruptTree {
                reason: format!(
                    "expected {} levels, found {}",
                    rebuilt.levels.len(),
                    levels.len()
                ),
            });
        }
        if let Some(depth) = rebuilt
            .levels
            .iter()
            .zip(levels.iter())
            .position(|(a, b)| a != b)
        {
            return Err(LedgerError::CorruptTree {
                reason: format!("level {} does not match its children", depth),
            });
        }
        Ok(rebuilt)
    }

    pub fn root(&self) -> Hash32 {
        // levels is never empty: the builder rejects empty leaf sets
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_default()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of hashing rounds from a leaf to the root
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn levels(&self) -> &[Vec<Hash32>] {
        &self.levels
    }

    /// Leaves in tree order
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn leaf(&self, index: usize) -> Option<&Leaf> {
        self.leaves.get(index)
    }

    /// Tree index of the leaf for `identity`
    pub fn position_of(&self, identity: &Identity) -> Option<usize> {
        self.index.get(identity).copied()
    }

    /// Sum of all leaf amounts, `None` when it leaves the 256-bit range
    ///
    /// Every leaf amount fits in 256 bits on its own, so an oversized sum
    /// never invalidates the tree.
    pub fn total_amount(&self) -> Option<Amount> {
        self.leaves
            .iter()
            .try_fold(Amount::ZERO, |acc, leaf| acc.checked_add(&leaf.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(byte: u8, amount: u64) -> LedgerEntry {
        LedgerEntry::new(Identity::new([byte; 20]), Amount::from(amount))
    }

    #[test]
    fn test_empty_ledger_rejected() {
        assert_eq!(
            TreeBuilder::new().build(&[]),
            Err(LedgerError::EmptyLedger)
        );
    }

    #[test]
    fn test_single_leaf_root_is_leaf_hash() {
        let tree = TreeBuilder::new().build(&[entry(1, 10)]).unwrap();
        assert_eq!(tree.root(), tree.leaves()[0].leaf_hash);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_level_zero_is_sorted() {
        let entries: Vec<_> = (0..9u8).map(|i| entry(i, u64::from(i) * 7)).collect();
        let tree = TreeBuilder::new().build(&entries).unwrap();
        let base = &tree.levels()[0];
        assert!(base.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_level_sizes_halve_with_promotion() {
        let entries: Vec<_> = (0..5u8).map(|i| entry(i, 1)).collect();
        let tree = TreeBuilder::new().build(&entries).unwrap();
        let sizes: Vec<usize> = tree.levels().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 3, 2, 1]);
        // the odd node is promoted, not hashed with itself
        assert_eq!(tree.levels()[1][2], tree.levels()[0][4]);
    }

    #[test]
    fn test_duplicates_counted_across_full_scan() {
        let entries = vec![entry(1, 1), entry(2, 2), entry(1, 3), entry(2, 4), entry(3, 5)];
        match TreeBuilder::new().build(&entries) {
            Err(LedgerError::DuplicateIdentity { duplicates, .. }) => assert_eq!(duplicates, 2),
            other => panic!("expected DuplicateIdentity, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let entries: Vec<_> = (0..=255u8).map(|i| entry(i, u64::from(i))).collect();
        let seq = TreeBuilder::new().with_parallel(false).build(&entries).unwrap();
        let par = TreeBuilder::new().with_parallel(true).build(&entries).unwrap();
        assert_eq!(seq.levels(), par.levels());
    }

    #[test]
    fn test_from_parts_rejects_tampered_level() {
        let entries: Vec<_> = (0..4u8).map(|i| entry(i, 1)).collect();
        let tree = TreeBuilder::new().build(&entries).unwrap();
        let mut levels = tree.levels().to_vec();
        levels[1][0] = Hash32::new([0u8; 32]);
        let err = MerkleTree::from_parts(tree.leaves().to_vec(), levels).unwrap_err();
        assert!(matches!(err, LedgerError::CorruptTree { .. }));
    }

    #[test]
    fn test_from_parts_rejects_reordered_leaves() {
        let entries: Vec<_> = (0..4u8).map(|i| entry(i, 1)).collect();
        let tree = TreeBuilder::new().build(&entries).unwrap();
        let mut leaves = tree.leaves().to_vec();
        leaves.swap(0, 1);
        let err = MerkleTree::from_parts(leaves, tree.levels().to_vec()).unwrap_err();
        assert!(matches!(err, LedgerError::CorruptTree { .. }));
    }

    #[test]
    fn test_total_amount() {
        let tree = TreeBuilder::new()
            .build(&[entry(1, 100), entry(2, 50), entry(3, 25)])
            .unwrap();
        assert_eq!(tree.total_amount(), Some(Amount::from(175u64)));
    }

    #[test]
    fn test_total_amount_past_256_bits_is_none() {
        let tree = TreeBuilder::new()
            .build(&[
                LedgerEntry::new(Identity::new([1u8; 20]), Amount::MAX),
                entry(2, 1),
            ])
            .unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.total_amount(), None);
    }
}
