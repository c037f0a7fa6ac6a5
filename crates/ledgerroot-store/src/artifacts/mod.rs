//! On-disk artifact formats
//!
//! - `tree.json`: full level structure plus the tree-ordered values
//! - `proofs.json`: one proof record per entry, in tree order
//! - `manifest.json`: digests binding the two files to one build

pub mod manifest;
pub mod schema;

pub use manifest::{compute_file_digest, compute_semantic_digest, BuildManifest};
pub use schema::{
    TreeArtifact, ValueRecord, MANIFEST_FILE, PROOFS_FILE, TREE_FILE, TREE_FORMAT,
};
