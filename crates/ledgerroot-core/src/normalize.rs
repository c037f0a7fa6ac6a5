//! Identity normalization at the ledger boundary
//!
//! Runs once per entry, upstream of the leaf encoder. The core only ever
//! sees canonical 20-byte identities.

use crate::errors::{LedgerError, Result};
use crate::model::Identity;

/// Maps a display-form identity to its canonical bytes
pub trait IdentityNormalizer: Send + Sync {
    /// # Errors
    ///
    /// Returns `InvalidIdentityEncoding` or `InvalidIdentity` when `raw`
    /// cannot be mapped.
    fn normalize(&self, raw: &str) -> Result<Identity>;
}

/// Accepts `0x`-prefixed 40-digit hex in any casing
///
/// Mixed-case checksums are not validated; `0xABC…` and `0xabc…` map to the
/// same identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexIdentityNormalizer;

impl IdentityNormalizer for HexIdentityNormalizer {
    fn normalize(&self, raw: &str) -> Result<Identity> {
        let trimmed = raw.trim();
        if !(trimmed.starts_with("0x") || trimmed.starts_with("0X")) {
            return Err(LedgerError::InvalidIdentityEncoding {
                value: raw.to_string(),
                reason: "missing 0x prefix".to_string(),
            });
        }
        Identity::from_hex(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casing_is_ignored() {
        let n = HexIdentityNormalizer;
        let a = n.normalize("0xDE709F2102306220921060314715629080E2FB77").unwrap();
        let b = n.normalize("  0xde709f2102306220921060314715629080e2fb77 ").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_prefix_required() {
        let err = HexIdentityNormalizer
            .normalize("de709f2102306220921060314715629080e2fb77")
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidIdentityEncoding { .. }));
    }

    #[test]
    fn test_short_hex_is_invalid_identity() {
        let err = HexIdentityNormalizer.normalize("0xdead").unwrap_err();
        assert_eq!(err, LedgerError::InvalidIdentity { len: 2 });
    }
}
