//! LedgerRoot Store - ledger input and artifact persistence
//!
//! Provides:
//! - CSV / JSON ledger reader with row-numbered errors
//! - Tree, proof and manifest artifact schemas
//! - Atomic multi-file writes (temp→rename)
//! - Directory-backed artifact store with load-time validation

pub mod artifact_store;
pub mod artifacts;
pub mod errors;
pub mod fs;
pub mod ledger;

// Re-export key types
pub use artifact_store::{ArtifactStore, PersistOutcome, RenderedArtifacts};
pub use artifacts::{BuildManifest, TreeArtifact};
pub use errors::Result;
pub use ledger::{read_ledger, LedgerFormat, LedgerRow};
