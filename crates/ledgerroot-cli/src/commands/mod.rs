pub mod build;
pub mod proof;
pub mod reconcile;
pub mod verify;

/// Exit code for a well-formed check that found a problem
pub const EXIT_DISCREPANCY: i32 = 2;
