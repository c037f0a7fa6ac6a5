//! The single hash function `H` used for leaves and internal nodes

use crate::model::{Hash32, HASH_LEN};
use sha2::{Digest, Sha256};

/// Name of `H`, recorded in every tree artifact
pub const HASH_ALGORITHM: &str = "sha256";

/// `H(data)`
pub fn hash_bytes(data: &[u8]) -> Hash32 {
    let digest = Sha256::digest(data);
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&digest);
    Hash32::new(out)
}

/// Sorted-pair node hash: `H(min(a, b) ‖ max(a, b))`
///
/// Commutative, so a proof never needs to carry left/right direction bits.
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = Hash32::ordered(*a, *b);
    let mut hasher = Sha256::new();
    hasher.update(lo.as_bytes());
    hasher.update(hi.as_bytes());
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&hasher.finalize());
    Hash32::new(out)
}
