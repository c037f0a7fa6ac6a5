//! ProofVerifier: recompute a root from `(identity, amount, path)`
//!
//! Depends only on the leaf encoder and `H`; a verifier can be built from
//! this module alone without any tree state.

use crate::hashing::hash_pair;
use crate::leaf::LeafEncoder;
use crate::model::{Amount, Hash32, Identity};
use crate::proof::Proof;

pub struct ProofVerifier;

impl ProofVerifier {
    /// Fold `path` over the entry's leaf hash with sorted-pair hashing
    pub fn compute_root(identity: &Identity, amount: &Amount, path: &[Hash32]) -> Hash32 {
        path.iter()
            .fold(LeafEncoder::leaf_hash(identity, amount), |current, sibling| {
                hash_pair(&current, sibling)
            })
    }

    /// `true` iff the folded path equals `root`
    pub fn verify(identity: &Identity, amount: &Amount, path: &[Hash32], root: &Hash32) -> bool {
        Self::compute_root(identity, amount, path) == *root
    }

    pub fn verify_proof(proof: &Proof, root: &Hash32) -> bool {
        Self::verify(&proof.identity, &proof.amount, &proof.path, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_checks_leaf_hash() {
        let identity = Identity::new([4; 20]);
        let amount = Amount::from(9u64);
        let root = LeafEncoder::leaf_hash(&identity, &amount);
        assert!(ProofVerifier::verify(&identity, &amount, &[], &root));
        assert!(!ProofVerifier::verify(&identity, &Amount::from(8u64), &[], &root));
    }

    #[test]
    fn test_two_leaf_fold() {
        let a = (Identity::new([1; 20]), Amount::from(1u64));
        let b = (Identity::new([2; 20]), Amount::from(2u64));
        let ha = LeafEncoder::leaf_hash(&a.0, &a.1);
        let hb = LeafEncoder::leaf_hash(&b.0, &b.1);
        let root = hash_pair(&ha, &hb);
        assert!(ProofVerifier::verify(&a.0, &a.1, &[hb], &root));
        assert!(ProofVerifier::verify(&b.0, &b.1, &[ha], &root));
        assert!(!ProofVerifier::verify(&a.0, &a.1, &[ha], &root));
    }
}
