use crate::errors::{LedgerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Width of every digest in the tree
pub const HASH_LEN: usize = 32;

/// A 32-byte digest: leaf hash, internal node or root
///
/// `Ord` compares bytes lexicographically, which is the ascending order used
/// for level 0 and for sorted-pair hashing.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash32([u8; HASH_LEN]);

impl Hash32 {
    /// Wrap raw digest bytes
    pub fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Decode a `0x`-prefixed (or bare) 64-digit hex digest
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidHash` when the text is not 32 bytes of hex.
    pub fn from_hex(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let mut out = [0u8; HASH_LEN];
        hex::decode_to_slice(digits, &mut out).map_err(|e| LedgerError::InvalidHash {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(out))
    }

    /// Return `(min, max)` of two digests
    pub fn ordered(a: Hash32, b: Hash32) -> (Hash32, Hash32) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({})", self.to_hex())
    }
}

impl Serialize for Hash32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Hash32::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
