//! LedgerRoot Engine - Orchestration layer
//!
//! Coordinates ledger normalization, the core commitment engine and the
//! artifact store behind a single `apply_engine_command` entry point.

pub mod commands;

pub use commands::commit::{CommitOptions, CommitResult};
pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::verify::Claim;
