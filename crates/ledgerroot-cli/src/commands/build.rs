//! Build command
//!
//! Usage: ledgerroot build --ledger <FILE> [--out <DIR>] [--dry-run]

use crate::config::Settings;
use clap::Args;
use ledgerroot_core::HexIdentityNormalizer;
use ledgerroot_core_types::RequestContext;
use ledgerroot_engine::{apply_engine_command, CommitOptions, EngineCommand, EngineCommandResult};
use ledgerroot_store::{read_ledger, ArtifactStore};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Ledger file (.csv or .json)
    #[arg(long)]
    pub ledger: PathBuf,

    /// Output directory for tree.json, proofs.json and manifest.json
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Compute the root without writing artifacts
    #[arg(long)]
    pub dry_run: bool,

    /// Hash leaves on a single thread
    #[arg(long)]
    pub sequential: bool,
}

pub fn execute(args: BuildArgs, settings: &Settings) -> Result<i32, Box<dyn std::error::Error>> {
    let rows = read_ledger(&args.ledger)?;
    let store = ArtifactStore::new(settings.output_dir_or(args.out));

    let cmd = EngineCommand::Commit {
        rows,
        options: CommitOptions {
            dry_run: args.dry_run,
            parallel: settings.parallel && !args.sequential,
        },
    };

    let result = match apply_engine_command(
        cmd,
        &store,
        &HexIdentityNormalizer,
        &RequestContext::new(),
    )? {
        EngineCommandResult::Commit(r) => r,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    let status = if result.dry_run {
        "dry-run"
    } else if result.unchanged {
        "unchanged"
    } else {
        "written"
    };

    println!("root: {}", result.root);
    println!("leaf_count: {}", result.leaf_count);
    println!("depth: {}", result.depth);
    match result.total_amount {
        Some(total) => println!("total_amount: {}", total),
        None => println!("total_amount: overflow"),
    }
    println!("semantic_digest: {}", result.semantic_digest);
    println!("status: {}", status);
    if !result.dry_run {
        println!("out: {}", store.dir().display());
    }

    Ok(0)
}
