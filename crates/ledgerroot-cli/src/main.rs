//! LedgerRoot CLI
//!
//! Command-line interface for building and checking ledger commitments

use clap::{Parser, Subcommand};
use ledgerroot_core::logging_facility;
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "ledgerroot")]
#[command(about = "LedgerRoot - Merkle commitments for finalized ledgers", long_about = None)]
struct Cli {
    /// Config file (default: ./ledgerroot.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log profile: development, production or off
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the tree, proofs and manifest for a ledger
    Build(commands::build::BuildArgs),
    /// Print the proof for one identity from a persisted build
    Proof(commands::proof::ProofArgs),
    /// Verify a claim against a published root
    Verify(commands::verify::VerifyArgs),
    /// Reconcile a ledger against a persisted build
    Reconcile(commands::reconcile::ReconcileArgs),
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = config::Settings::load(cli.config.as_deref(), cli.log.as_deref())?;
    logging_facility::init(settings.log_profile);

    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &settings),
        Commands::Proof(args) => commands::proof::execute(args, &settings),
        Commands::Verify(args) => commands::verify::execute(args, &settings),
        Commands::Reconcile(args) => commands::reconcile::execute(args, &settings),
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
