//! LedgerRoot Core - canonical Merkle commitment engine
//!
//! Turns a finalized ledger of `(identity, amount)` entries into a 32-byte
//! root plus one inclusion proof per entry:
//! - `leaf` encodes an entry into its 52-byte preimage and double hash
//! - `tree` sorts the leaf hashes and reduces them with sorted-pair hashing
//! - `proof` walks a leaf's siblings up to the root
//! - `verify` folds a proof back into a root without any tree state
//! - `reconcile` checks a ledger against a published proof set
//!
//! The tree is a pure function of the leaf set: any permutation of the same
//! ledger yields the same root, levels and proofs.

pub mod errors;
pub mod hashing;
pub mod leaf;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod proof;
pub mod reconcile;
pub mod tree;
pub mod verify;

// Re-export commonly used types
pub use errors::{ErrorClass, ExError, ExErrorKind, LedgerError, Result};
pub use hashing::HASH_ALGORITHM;
pub use leaf::{Leaf, LeafEncoder, LEAF_ENCODING};
pub use model::{Amount, Hash32, Identity, LedgerEntry};
pub use normalize::{HexIdentityNormalizer, IdentityNormalizer};
pub use proof::{Proof, ProofGenerator};
pub use reconcile::{reconcile, AmountMismatch, ReconcileReport};
pub use tree::{MerkleTree, TreeBuilder};
pub use verify::ProofVerifier;
