//! Structured logging for LedgerRoot
//!
//! One initialization point (`init(profile)`), three boundary macros and an
//! in-memory capture layer for tests. Every commitment operation emits exactly
//! one `start` event and one `end` or `end_error` event from the layer that
//! owns it.
//!
//! ```rust
//! use ledgerroot_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! - `log_op_start!(op, ...)`
//! - `log_op_end!(op, duration_ms = ...)`
//! - `log_op_error!(op, err, duration_ms = ...)`

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
