//! End-to-end commitment scenarios over the core engine
//!
//! ## Scenarios Covered
//!
//! 1. Three-entry ledger: order independence, proof shapes, verification
//! 2. One-leaf tree
//! 3. Duplicate identity aborts the build
//! 4. Every proof of larger trees verifies

mod common;

use common::{abc_ledger, entry, identity, ledger_of};
use ledgerroot_core::{
    Amount, LedgerError, LeafEncoder, ProofGenerator, ProofVerifier, TreeBuilder,
};

#[test]
fn test_abc_root_independent_of_order() {
    // GIVEN the ledger in two different orders
    let abc = abc_ledger();
    let cab = vec![abc[2], abc[0], abc[1]];

    // WHEN both are built
    let t1 = TreeBuilder::new().build(&abc).unwrap();
    let t2 = TreeBuilder::new().build(&cab).unwrap();

    // THEN roots and levels are identical
    assert_eq!(t1.root(), t2.root());
    assert_eq!(t1.levels(), t2.levels());
}

#[test]
fn test_abc_proof_shapes_and_verification() {
    let tree = TreeBuilder::new().build(&abc_ledger()).unwrap();
    let gen = ProofGenerator::new(&tree);

    // Three leaves reduce 3 -> 2 -> 1: tree indices 0 and 1 are paired,
    // index 2 is promoted once and then paired.
    let lens: Vec<usize> = gen.all_proofs().iter().map(|p| p.path.len()).collect();
    assert_eq!(lens, vec![2, 2, 1]);

    for e in abc_ledger() {
        let proof = gen.proof_for(&e.identity).unwrap();
        assert_eq!(proof.amount, e.amount);
        assert!(ProofVerifier::verify(
            &e.identity,
            &e.amount,
            &proof.path,
            &tree.root()
        ));
    }
}

#[test]
fn test_abc_root_matches_hand_computation() {
    use ledgerroot_core::hashing::hash_pair;

    let mut hashes: Vec<_> = abc_ledger()
        .iter()
        .map(|e| LeafEncoder::leaf_hash(&e.identity, &e.amount))
        .collect();
    hashes.sort();
    let expected = hash_pair(&hash_pair(&hashes[0], &hashes[1]), &hashes[2]);

    let tree = TreeBuilder::new().build(&abc_ledger()).unwrap();
    assert_eq!(tree.root(), expected);
}

#[test]
fn test_wrong_amount_fails() {
    let tree = TreeBuilder::new().build(&abc_ledger()).unwrap();
    let proof = ProofGenerator::new(&tree)
        .proof_for(&identity(0xaa))
        .unwrap();
    assert!(!ProofVerifier::verify(
        &identity(0xaa),
        &Amount::from(101u64),
        &proof.path,
        &tree.root()
    ));
}

#[test]
fn test_single_leaf_tree() {
    let e = entry(0x42, 7);
    let tree = TreeBuilder::new().build(&[e]).unwrap();
    let proof = ProofGenerator::new(&tree).proof_for(&e.identity).unwrap();

    assert_eq!(tree.root(), LeafEncoder::leaf_hash(&e.identity, &e.amount));
    assert!(proof.path.is_empty());
    assert!(ProofVerifier::verify_proof(&proof, &tree.root()));
}

#[test]
fn test_duplicate_identity_aborts_build() {
    let mut ledger = abc_ledger();
    ledger.push(entry(0xbb, 1));

    let err = TreeBuilder::new().build(&ledger).unwrap_err();
    assert_eq!(
        err,
        LedgerError::DuplicateIdentity {
            identity: identity(0xbb).to_hex(),
            duplicates: 1
        }
    );
}

#[test]
fn test_every_proof_verifies_for_various_sizes() {
    for n in [2usize, 3, 4, 7, 8, 9, 33, 100] {
        let tree = TreeBuilder::new().build(&ledger_of(n)).unwrap();
        let root = tree.root();
        let proofs = ProofGenerator::new(&tree).all_proofs();
        assert_eq!(proofs.len(), n);
        for proof in &proofs {
            assert!(
                ProofVerifier::verify_proof(proof, &root),
                "proof for {} failed with n={}",
                proof.identity,
                n
            );
            assert!(proof.path.len() <= tree.depth());
        }
    }
}

#[test]
fn test_proof_from_other_tree_fails() {
    let t1 = TreeBuilder::new().build(&ledger_of(5)).unwrap();
    let t2 = TreeBuilder::new().build(&ledger_of(6)).unwrap();
    let proof = ProofGenerator::new(&t1).proof_at(0).unwrap();
    assert!(!ProofVerifier::verify_proof(&proof, &t2.root()));
}
