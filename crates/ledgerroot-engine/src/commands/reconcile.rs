//! Reconciliation of a ledger against the persisted proof set

#![allow(clippy::result_large_err)]

use crate::commands::ledger_input::normalize_rows;
use ledgerroot_core::errors::ExError;
use ledgerroot_core::{
    log_op_end, log_op_error, log_op_start, reconcile, IdentityNormalizer, ReconcileReport,
};
use ledgerroot_core_types::RequestContext;
use ledgerroot_store::errors::Result;
use ledgerroot_store::{ArtifactStore, LedgerRow};

/// Reconcile `rows` against `proofs.json`, verifying each proof against the
/// manifest root
///
/// ## Errors
///
/// - Row errors as for commit
/// - `CorruptArtifact`: manifest and files disagree
/// - `AmountOverflow`: a total leaves the 256-bit range
pub fn reconcile_ledger(
    rows: &[LedgerRow],
    store: &ArtifactStore,
    normalizer: &dyn IdentityNormalizer,
    ctx: &RequestContext,
) -> Result<ReconcileReport> {
    log_op_start!(
        "reconcile_ledger",
        request_id = ctx.request_id.as_str(),
        rows = rows.len()
    );
    let start = std::time::Instant::now();

    let report = reconcile_ledger_impl(rows, store, normalizer).map_err(|e| {
        let e = e.with_request_id(ctx.request_id.clone());
        log_op_error!(
            "reconcile_ledger",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "reconcile_ledger",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        clean = report.is_clean(),
        invalid_proofs = report.invalid_proofs.len()
    );

    Ok(report)
}

fn reconcile_ledger_impl(
    rows: &[LedgerRow],
    store: &ArtifactStore,
    normalizer: &dyn IdentityNormalizer,
) -> Result<ReconcileReport> {
    let entries = normalize_rows(rows, normalizer)?;
    let manifest = store.verify_integrity()?;
    let proofs = store.load_proofs()?;
    reconcile(&entries, &proofs, &manifest.root)
        .map_err(|e| ExError::from(e).with_op("reconcile_ledger"))
}
