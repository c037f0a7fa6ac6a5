//! Reconcile command
//!
//! Usage: ledgerroot reconcile --ledger <FILE> [--out <DIR>] [--json]
//!
//! Exit 0 when clean, 2 when any discrepancy is found.

use super::EXIT_DISCREPANCY;
use crate::config::Settings;
use clap::Args;
use ledgerroot_core::{HexIdentityNormalizer, Identity, ReconcileReport};
use ledgerroot_core_types::RequestContext;
use ledgerroot_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use ledgerroot_store::{read_ledger, ArtifactStore};
use std::path::PathBuf;

/// Identities listed per category before truncating
const LIST_LIMIT: usize = 5;

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Ledger file (.csv or .json)
    #[arg(long)]
    pub ledger: PathBuf,

    /// Directory holding a persisted build
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ReconcileArgs, settings: &Settings) -> Result<i32, Box<dyn std::error::Error>> {
    let rows = read_ledger(&args.ledger)?;
    let store = ArtifactStore::new(settings.output_dir_or(args.out));

    let report = match apply_engine_command(
        EngineCommand::Reconcile { rows },
        &store,
        &HexIdentityNormalizer,
        &RequestContext::new(),
    )? {
        EngineCommandResult::Reconcile(r) => r,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_clean() { 0 } else { EXIT_DISCREPANCY })
}

fn print_identities(label: &str, ids: &[Identity]) {
    if ids.is_empty() {
        return;
    }
    println!("{}: {}", label, ids.len());
    for id in ids.iter().take(LIST_LIMIT) {
        println!("  {}", id);
    }
    if ids.len() > LIST_LIMIT {
        println!("  ... {} more", ids.len() - LIST_LIMIT);
    }
}

fn print_report(report: &ReconcileReport) {
    println!("root: {}", report.root);
    println!("ledger_entries: {}", report.ledger_entries);
    println!("proof_entries: {}", report.proof_entries);
    println!("ledger_total: {}", report.ledger_total);
    println!("proof_total: {}", report.proof_total);
    println!("totals_match: {}", report.totals_match);

    print_identities("ledger_only", &report.ledger_only);
    print_identities("proofs_only", &report.proofs_only);
    print_identities("invalid_proofs", &report.invalid_proofs);
    print_identities("duplicate_ledger_identities", &report.duplicate_ledger_identities);
    print_identities("duplicate_proof_identities", &report.duplicate_proof_identities);

    if !report.amount_mismatches.is_empty() {
        println!("amount_mismatches: {}", report.amount_mismatches.len());
        for m in report.amount_mismatches.iter().take(LIST_LIMIT) {
            println!(
                "  {}: ledger {} proof {}",
                m.identity, m.ledger_amount, m.proof_amount
            );
        }
    }

    println!("status: {}", if report.is_clean() { "clean" } else { "discrepancies" });
}
