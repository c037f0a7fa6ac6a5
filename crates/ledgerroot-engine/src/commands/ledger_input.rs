//! Ledger rows → canonical entries
//!
//! Runs the identity normalizer once per row, then the amount parser. Every
//! failure carries the row's line number.

#![allow(clippy::result_large_err)]

use ledgerroot_core::errors::ExError;
use ledgerroot_core::{Amount, IdentityNormalizer, LedgerEntry};
use ledgerroot_store::errors::Result;
use ledgerroot_store::LedgerRow;

/// Normalize every row; the first bad row aborts the batch
pub fn normalize_rows(
    rows: &[LedgerRow],
    normalizer: &dyn IdentityNormalizer,
) -> Result<Vec<LedgerEntry>> {
    rows.iter()
        .map(|row| {
            let identity = normalizer.normalize(&row.address).map_err(|e| {
                ExError::from(e)
                    .with_op("normalize_ledger")
                    .with_line(row.line)
                    .with_identity(row.address.clone())
            })?;
            let amount = Amount::from_dec_str(&row.amount).map_err(|e| {
                ExError::from(e)
                    .with_op("normalize_ledger")
                    .with_line(row.line)
                    .with_identity(identity.to_hex())
            })?;
            Ok(LedgerEntry::new(identity, amount))
        })
        .collect()
}
