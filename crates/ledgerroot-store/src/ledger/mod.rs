//! Ledger input files
//!
//! The reader only splits rows; identity normalization and amount parsing
//! happen downstream so each failure can be reported against its row.

pub mod reader;

pub use reader::{parse_ledger_str, read_ledger, LedgerFormat, LedgerRow};
