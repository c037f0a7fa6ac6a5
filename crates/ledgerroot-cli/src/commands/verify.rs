//! Verify command
//!
//! Usage: ledgerroot verify --identity <0x..> --amount <N> --root <0x..> [--path <h1,h2,..>]
//!
//! Prints `valid` (exit 0) or `invalid` (exit 2). The output directory is
//! never read.

use super::EXIT_DISCREPANCY;
use crate::config::Settings;
use clap::Args;
use ledgerroot_core::HexIdentityNormalizer;
use ledgerroot_core_types::RequestContext;
use ledgerroot_engine::{apply_engine_command, Claim, EngineCommand, EngineCommandResult};
use ledgerroot_store::ArtifactStore;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[arg(long)]
    pub identity: String,

    /// Base-10 amount
    #[arg(long)]
    pub amount: String,

    /// Published root (0x-prefixed hex)
    #[arg(long)]
    pub root: String,

    /// Sibling hashes, leaf to root
    #[arg(long, value_delimiter = ',')]
    pub path: Vec<String>,
}

pub fn execute(args: VerifyArgs, settings: &Settings) -> Result<i32, Box<dyn std::error::Error>> {
    let claim = Claim {
        identity: args.identity,
        amount: args.amount,
        path: args.path,
        root: args.root,
    };

    let store = ArtifactStore::new(settings.output_dir_or(None));

    let valid = match apply_engine_command(
        EngineCommand::Verify { claim },
        &store,
        &HexIdentityNormalizer,
        &RequestContext::new(),
    )? {
        EngineCommandResult::Verify { valid } => valid,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    if valid {
        println!("valid");
        Ok(0)
    } else {
        println!("invalid");
        Ok(EXIT_DISCREPANCY)
    }
}
