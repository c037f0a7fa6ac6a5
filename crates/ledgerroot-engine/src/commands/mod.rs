//! Command orchestration layer.
//!
//! Coordinates core commitment logic with the artifact store.
//!
//! ## Logging Ownership
//!
//! The engine owns lifecycle logging for every command:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()`.

pub mod commit;
pub mod engine_command;
pub mod ledger_input;
pub mod proof;
pub mod reconcile;
pub mod verify;
