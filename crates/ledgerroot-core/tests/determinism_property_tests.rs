//! Property tests: order independence and tamper detection

use ledgerroot_core::{Amount, Identity, LedgerEntry, ProofGenerator, ProofVerifier, TreeBuilder};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Distinct-identity ledgers of 1..40 entries
fn ledger_strategy() -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::btree_map(any::<[u8; 20]>(), any::<u64>(), 1..40).prop_map(
        |map: BTreeMap<[u8; 20], u64>| {
            map.into_iter()
                .map(|(id, amount)| LedgerEntry::new(Identity::new(id), Amount::from(amount)))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_root_independent_of_order(
        (ledger, shuffled) in ledger_strategy().prop_flat_map(|l| {
            let original = l.clone();
            (Just(original), Just(l).prop_shuffle())
        })
    ) {
        let a = TreeBuilder::new().build(&ledger).unwrap();
        let b = TreeBuilder::new().build(&shuffled).unwrap();
        prop_assert_eq!(a.root(), b.root());
        prop_assert_eq!(
            ProofGenerator::new(&a).all_proofs(),
            ProofGenerator::new(&b).all_proofs()
        );
    }

    #[test]
    fn prop_every_proof_verifies(ledger in ledger_strategy()) {
        let tree = TreeBuilder::new().build(&ledger).unwrap();
        for proof in ProofGenerator::new(&tree).all_proofs() {
            prop_assert!(ProofVerifier::verify_proof(&proof, &tree.root()));
        }
    }

    #[test]
    fn prop_identity_bit_flip_fails(
        ledger in ledger_strategy(),
        pick in any::<prop::sample::Index>(),
        bit in 0usize..160,
    ) {
        let tree = TreeBuilder::new().build(&ledger).unwrap();
        let proof = ProofGenerator::new(&tree).proof_at(pick.index(tree.leaf_count())).unwrap();

        let mut raw = *proof.identity.as_bytes();
        raw[bit / 8] ^= 1 << (bit % 8);
        let tampered = Identity::new(raw);

        prop_assert!(!ProofVerifier::verify(&tampered, &proof.amount, &proof.path, &tree.root()));
    }

    #[test]
    fn prop_amount_bit_flip_fails(
        ledger in ledger_strategy(),
        pick in any::<prop::sample::Index>(),
        bit in 0usize..256,
    ) {
        let tree = TreeBuilder::new().build(&ledger).unwrap();
        let proof = ProofGenerator::new(&tree).proof_at(pick.index(tree.leaf_count())).unwrap();

        let mut raw = proof.amount.to_be_bytes();
        raw[bit / 8] ^= 1 << (bit % 8);
        let tampered = Amount::from_be_bytes(raw);

        prop_assert!(!ProofVerifier::verify(&proof.identity, &tampered, &proof.path, &tree.root()));
    }

    #[test]
    fn prop_amount_decimal_round_trip(hi in any::<u128>(), lo in any::<u128>()) {
        let mut raw = [0u8; 32];
        raw[..16].copy_from_slice(&hi.to_be_bytes());
        raw[16..].copy_from_slice(&lo.to_be_bytes());
        let amount = Amount::from_be_bytes(raw);
        prop_assert_eq!(Amount::from_dec_str(&amount.to_string()).unwrap(), amount);
    }
}
