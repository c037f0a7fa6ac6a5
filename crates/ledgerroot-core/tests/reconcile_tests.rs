//! Reconciliation of a ledger against a proof set

mod common;

use common::{abc_ledger, entry, identity};
use ledgerroot_core::{reconcile, Amount, Hash32, ProofGenerator, TreeBuilder};

#[test]
fn test_matching_ledger_is_clean() {
    let ledger = abc_ledger();
    let tree = TreeBuilder::new().build(&ledger).unwrap();
    let proofs = ProofGenerator::new(&tree).all_proofs();

    let report = reconcile(&ledger, &proofs, &tree.root()).unwrap();

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.ledger_total, Amount::from(175u64));
    assert_eq!(report.proof_total, report.ledger_total);
}

#[test]
fn test_detects_missing_and_extra_identities() {
    let tree = TreeBuilder::new().build(&abc_ledger()).unwrap();
    let proofs = ProofGenerator::new(&tree).all_proofs();
    let ledger = vec![entry(0xaa, 100), entry(0xbb, 50), entry(0xdd, 25)];

    let report = reconcile(&ledger, &proofs, &tree.root()).unwrap();

    assert_eq!(report.ledger_only, vec![identity(0xdd)]);
    assert_eq!(report.proofs_only, vec![identity(0xcc)]);
    assert!(report.totals_match);
    assert!(!report.is_clean());
}

#[test]
fn test_detects_amount_mismatch_and_total_difference() {
    let tree = TreeBuilder::new().build(&abc_ledger()).unwrap();
    let proofs = ProofGenerator::new(&tree).all_proofs();
    let ledger = vec![entry(0xaa, 100), entry(0xbb, 51), entry(0xcc, 25)];

    let report = reconcile(&ledger, &proofs, &tree.root()).unwrap();

    assert!(!report.totals_match);
    assert_eq!(report.amount_mismatches.len(), 1);
    let m = &report.amount_mismatches[0];
    assert_eq!(m.identity, identity(0xbb));
    assert_eq!(m.ledger_amount, Amount::from(51u64));
    assert_eq!(m.proof_amount, Amount::from(50u64));
}

#[test]
fn test_detects_tampered_proof() {
    let ledger = abc_ledger();
    let tree = TreeBuilder::new().build(&ledger).unwrap();
    let mut proofs = ProofGenerator::new(&tree).all_proofs();
    proofs[0].path[0] = Hash32::new([0x11; 32]);

    let report = reconcile(&ledger, &proofs, &tree.root()).unwrap();

    assert_eq!(report.invalid_proofs, vec![proofs[0].identity]);
}

#[test]
fn test_wrong_root_invalidates_every_proof() {
    let ledger = abc_ledger();
    let tree = TreeBuilder::new().build(&ledger).unwrap();
    let proofs = ProofGenerator::new(&tree).all_proofs();

    let report = reconcile(&ledger, &proofs, &Hash32::new([0u8; 32])).unwrap();

    assert_eq!(report.invalid_proofs.len(), 3);
}
