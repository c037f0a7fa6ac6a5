//! Error handling for ledgerroot-store
//!
//! Wraps ledgerroot-core ExError with store-specific helpers

use ledgerroot_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a ledger row error (line is 1-based)
pub fn ledger_row_error(line: usize, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("read_ledger")
        .with_line(line)
        .with_message(reason.to_string())
}

/// Create an unsupported ledger format error
pub fn unsupported_format(path: &Path) -> ExError {
    ExError::new(ExErrorKind::UnsupportedFormat)
        .with_op("read_ledger")
        .with_message(format!(
            "Cannot infer ledger format of {} (expected .csv or .json)",
            path.display()
        ))
}

/// Create a corrupt artifact error
pub fn corrupt_artifact(file: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::CorruptArtifact)
        .with_op("load_artifact")
        .with_message(format!("{}: {}", file, reason))
}

/// Create a serialization error from serde_json::Error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
