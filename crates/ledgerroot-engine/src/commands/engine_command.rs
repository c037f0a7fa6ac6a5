//! Engine-level commands that touch the artifact store.

#![allow(clippy::result_large_err)]

use crate::commands::commit::{commit_ledger, CommitOptions, CommitResult};
use crate::commands::proof::proof_lookup;
use crate::commands::reconcile::reconcile_ledger;
use crate::commands::verify::{verify_claim, Claim};
use ledgerroot_core::{IdentityNormalizer, Proof, ReconcileReport};
use ledgerroot_core_types::RequestContext;
use ledgerroot_store::errors::Result;
use ledgerroot_store::{ArtifactStore, LedgerRow};

/// Engine-level commands.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Build and persist the commitment for a ledger.
    Commit {
        rows: Vec<LedgerRow>,
        options: CommitOptions,
    },
    /// Regenerate one proof from the persisted tree.
    ProofLookup { identity: String },
    /// Check a display-form claim against a root. Needs no store.
    Verify { claim: Claim },
    /// Compare a ledger with the persisted proof set.
    Reconcile { rows: Vec<LedgerRow> },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Commit(CommitResult),
    Proof(Proof),
    Verify { valid: bool },
    Reconcile(ReconcileReport),
}

/// Apply an engine command with the given identity normalizer.
pub fn apply_engine_command(
    cmd: EngineCommand,
    store: &ArtifactStore,
    normalizer: &dyn IdentityNormalizer,
    ctx: &RequestContext,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Commit { rows, options } => {
            commit_ledger(&rows, store, normalizer, &options, ctx).map(EngineCommandResult::Commit)
        }
        EngineCommand::ProofLookup { identity } => {
            proof_lookup(&identity, store, normalizer, ctx).map(EngineCommandResult::Proof)
        }
        EngineCommand::Verify { claim } => {
            verify_claim(&claim, normalizer, ctx).map(|valid| EngineCommandResult::Verify { valid })
        }
        EngineCommand::Reconcile { rows } => {
            reconcile_ledger(&rows, store, normalizer, ctx).map(EngineCommandResult::Reconcile)
        }
    }
}
