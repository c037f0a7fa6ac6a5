use crate::errors::{LedgerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Width of a canonical identity in bytes
pub const IDENTITY_LEN: usize = 20;

/// Canonical 20-byte identity of a ledger recipient
///
/// The core only ever compares and hashes the raw bytes. Casing of any
/// display form is irrelevant here; artifacts always carry lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// Wrap raw identity bytes
    pub fn new(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an identity from a byte slice of exactly 20 bytes
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidIdentity` for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; IDENTITY_LEN] = bytes
            .try_into()
            .map_err(|_| LedgerError::InvalidIdentity { len: bytes.len() })?;
        Ok(Self(raw))
    }

    /// Decode a `0x`-prefixed (or bare) hex identity in any casing
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentityEncoding` when the text is not hex and
    /// `InvalidIdentity` when it decodes to the wrong width.
    pub fn from_hex(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| LedgerError::InvalidIdentityEncoding {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// Raw identity bytes
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// Lowercase `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.to_hex())
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Identity::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
