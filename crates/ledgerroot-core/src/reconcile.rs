//! Reconciliation of a ledger against a published proof set

use crate::errors::{LedgerError, Result};
use crate::model::{Amount, Hash32, Identity, LedgerEntry};
use crate::proof::Proof;
use crate::verify::ProofVerifier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An identity whose ledger amount differs from its proof amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountMismatch {
    pub identity: Identity,
    pub ledger_amount: Amount,
    pub proof_amount: Amount,
}

/// Outcome of [`reconcile`]
///
/// Identity lists are sorted by identity bytes so reports are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub root: Hash32,
    pub ledger_entries: usize,
    pub proof_entries: usize,
    pub ledger_total: Amount,
    pub proof_total: Amount,
    pub totals_match: bool,
    pub ledger_only: Vec<Identity>,
    pub proofs_only: Vec<Identity>,
    pub amount_mismatches: Vec<AmountMismatch>,
    pub invalid_proofs: Vec<Identity>,
    pub duplicate_ledger_identities: Vec<Identity>,
    pub duplicate_proof_identities: Vec<Identity>,
}

impl ReconcileReport {
    /// No discrepancy of any kind
    pub fn is_clean(&self) -> bool {
        self.totals_match
            && self.ledger_only.is_empty()
            && self.proofs_only.is_empty()
            && self.amount_mismatches.is_empty()
            && self.invalid_proofs.is_empty()
            && self.duplicate_ledger_identities.is_empty()
            && self.duplicate_proof_identities.is_empty()
    }
}

fn sum<'a>(amounts: impl Iterator<Item = &'a Amount>, context: &str) -> Result<Amount> {
    let mut total = Amount::ZERO;
    for amount in amounts {
        total = total
            .checked_add(amount)
            .ok_or_else(|| LedgerError::AmountOverflow {
                context: context.to_string(),
            })?;
    }
    Ok(total)
}

/// Index entries by identity, keeping the first occurrence and recording repeats
fn index_first<T>(
    items: impl Iterator<Item = (Identity, T)>,
) -> (BTreeMap<Identity, T>, Vec<Identity>) {
    let mut map = BTreeMap::new();
    let mut repeated = BTreeSet::new();
    for (identity, value) in items {
        if map.contains_key(&identity) {
            repeated.insert(identity);
        } else {
            map.insert(identity, value);
        }
    }
    (map, repeated.into_iter().collect())
}

/// Compare a ledger with a proof set and check every proof against `root`
///
/// Totals are exact 256-bit sums over every row, repeats included.
///
/// # Errors
///
/// Returns `AmountOverflow` when either total leaves the 256-bit range.
pub fn reconcile(ledger: &[LedgerEntry], proofs: &[Proof], root: &Hash32) -> Result<ReconcileReport> {
    let ledger_total = sum(ledger.iter().map(|e| &e.amount), "ledger amounts")?;
    let proof_total = sum(proofs.iter().map(|p| &p.amount), "proof amounts")?;

    let (ledger_map, duplicate_ledger_identities) =
        index_first(ledger.iter().map(|e| (e.identity, e.amount)));
    let (proof_map, duplicate_proof_identities) =
        index_first(proofs.iter().map(|p| (p.identity, p)));

    let ledger_only = ledger_map
        .keys()
        .filter(|id| !proof_map.contains_key(*id))
        .copied()
        .collect();
    let proofs_only = proof_map
        .keys()
        .filter(|id| !ledger_map.contains_key(*id))
        .copied()
        .collect();

    let amount_mismatches = ledger_map
        .iter()
        .filter_map(|(identity, ledger_amount)| {
            proof_map
                .get(identity)
                .filter(|p| p.amount != *ledger_amount)
                .map(|p| AmountMismatch {
                    identity: *identity,
                    ledger_amount: *ledger_amount,
                    proof_amount: p.amount,
                })
        })
        .collect();

    let invalid: BTreeSet<Identity> = proofs
        .iter()
        .filter(|p| !ProofVerifier::verify_proof(p, root))
        .map(|p| p.identity)
        .collect();

    Ok(ReconcileReport {
        root: *root,
        ledger_entries: ledger.len(),
        proof_entries: proofs.len(),
        ledger_total,
        proof_total,
        totals_match: ledger_total == proof_total,
        ledger_only,
        proofs_only,
        amount_mismatches,
        invalid_proofs: invalid.into_iter().collect(),
        duplicate_ledger_identities,
        duplicate_proof_identities,
    })
}
