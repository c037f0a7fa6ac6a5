//! Proof command
//!
//! Usage: ledgerroot proof --identity <0x..> [--out <DIR>]

use crate::config::Settings;
use clap::Args;
use ledgerroot_core::HexIdentityNormalizer;
use ledgerroot_core_types::RequestContext;
use ledgerroot_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use ledgerroot_store::ArtifactStore;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ProofArgs {
    /// Identity to prove (0x-prefixed hex, any casing)
    #[arg(long)]
    pub identity: String,

    /// Directory holding a persisted build
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: ProofArgs, settings: &Settings) -> Result<i32, Box<dyn std::error::Error>> {
    let store = ArtifactStore::new(settings.output_dir_or(args.out));

    let proof = match apply_engine_command(
        EngineCommand::ProofLookup {
            identity: args.identity,
        },
        &store,
        &HexIdentityNormalizer,
        &RequestContext::new(),
    )? {
        EngineCommandResult::Proof(p) => p,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(0)
}
