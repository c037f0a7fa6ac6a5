//! Build commit: ledger → tree → proofs → artifacts
//!
//! ## Pipeline (in order):
//! 1. Normalize rows (identity normalizer, amount parser)
//! 2. Build the tree (EmptyLedger / DuplicateIdentity abort here)
//! 3. Generate every proof in tree order
//! 4. Render artifacts and manifest
//! 5. dry_run short-circuit (no writes)
//! 6. Persist, or report unchanged when the semantic digest matches

#![allow(clippy::result_large_err)]

use crate::commands::ledger_input::normalize_rows;
use chrono::Utc;
use ledgerroot_core::errors::ExError;
use ledgerroot_core::{
    log_op_end, log_op_error, log_op_start, Amount, Hash32, IdentityNormalizer, ProofGenerator,
    TreeBuilder,
};
use ledgerroot_core_types::RequestContext;
use ledgerroot_store::errors::Result;
use ledgerroot_store::{ArtifactStore, LedgerRow};

/// Options for a build commit
#[derive(Debug, Clone)]
pub struct CommitOptions {
    /// Compute everything but write nothing
    pub dry_run: bool,
    /// Hash leaves on the rayon pool
    pub parallel: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            parallel: true,
        }
    }
}

/// Result of a build commit
#[derive(Debug, Clone)]
pub struct CommitResult {
    pub root: Hash32,
    pub leaf_count: usize,
    pub depth: usize,
    /// `None` when the leaf amounts sum past `2^256 - 1`
    pub total_amount: Option<Amount>,
    /// Manifest semantic digest (stable across re-runs)
    pub semantic_digest: String,
    /// Existing artifacts already described this build
    pub unchanged: bool,
    pub dry_run: bool,
}

/// Commit a ledger to the artifact store
///
/// ## Errors
///
/// - `InvalidIdentity` / `InvalidAmount` / `AmountOutOfRange`: bad row (line attached)
/// - `EmptyLedger` / `DuplicateIdentity`: integrity failure, nothing written
/// - `Io` / `Serialization`: persistence failed, previous artifacts untouched
pub fn commit_ledger(
    rows: &[LedgerRow],
    store: &ArtifactStore,
    normalizer: &dyn IdentityNormalizer,
    options: &CommitOptions,
    ctx: &RequestContext,
) -> Result<CommitResult> {
    log_op_start!(
        "commit_ledger",
        request_id = ctx.request_id.as_str(),
        rows = rows.len(),
        dry_run = options.dry_run
    );
    let start = std::time::Instant::now();

    let result = commit_ledger_impl(rows, store, normalizer, options).map_err(|e| {
        let e = e.with_request_id(ctx.request_id.clone());
        log_op_error!(
            "commit_ledger",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "commit_ledger",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        root = %result.root,
        leaf_count = result.leaf_count,
        depth = result.depth,
        unchanged = result.unchanged
    );

    Ok(result)
}

fn commit_ledger_impl(
    rows: &[LedgerRow],
    store: &ArtifactStore,
    normalizer: &dyn IdentityNormalizer,
    options: &CommitOptions,
) -> Result<CommitResult> {
    let entries = normalize_rows(rows, normalizer)?;

    let tree = TreeBuilder::new()
        .with_parallel(options.parallel)
        .build(&entries)
        .map_err(ExError::from)?;
    let proofs = ProofGenerator::new(&tree).all_proofs();

    let rendered = ArtifactStore::render(&tree, &proofs, Utc::now())?;

    let mut result = CommitResult {
        root: tree.root(),
        leaf_count: tree.leaf_count(),
        depth: tree.depth(),
        total_amount: rendered.manifest.total_amount,
        semantic_digest: rendered.manifest.semantic_digest.clone(),
        unchanged: false,
        dry_run: options.dry_run,
    };

    if options.dry_run {
        result.unchanged = store
            .load_manifest()?
            .is_some_and(|m| m.semantic_digest == result.semantic_digest);
        return Ok(result);
    }

    let outcome = store.persist(&rendered)?;
    result.unchanged = outcome.unchanged;
    Ok(result)
}
