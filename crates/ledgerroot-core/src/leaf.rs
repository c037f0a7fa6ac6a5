//! LeafEncoder: canonical leaf preimage and double-hashed leaf digest

use crate::errors::Result;
use crate::hashing::hash_bytes;
use crate::model::{Amount, Hash32, Identity, LedgerEntry, AMOUNT_LEN, IDENTITY_LEN};
use serde::{Deserialize, Serialize};

/// Width of the leaf preimage: 20-byte identity followed by 32-byte amount
pub const ENCODED_LEAF_LEN: usize = IDENTITY_LEN + AMOUNT_LEN;

/// Description of the preimage layout, recorded in tree artifacts
pub const LEAF_ENCODING: &str = "identity[20] || amount_be[32], double sha256";

/// One encoded ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leaf {
    pub identity: Identity,
    pub amount: Amount,
    pub leaf_hash: Hash32,
}

impl Leaf {
    pub fn new(identity: Identity, amount: Amount) -> Self {
        Self {
            identity,
            amount,
            leaf_hash: LeafEncoder::leaf_hash(&identity, &amount),
        }
    }

    pub fn entry(&self) -> LedgerEntry {
        LedgerEntry::new(self.identity, self.amount)
    }
}

impl From<LedgerEntry> for Leaf {
    fn from(entry: LedgerEntry) -> Self {
        Leaf::new(entry.identity, entry.amount)
    }
}

/// Stateless leaf encoder
///
/// The builder and the verifier both go through this type, so the two sides
/// can never disagree on the preimage.
pub struct LeafEncoder;

impl LeafEncoder {
    /// `identity ‖ amount_be32`
    pub fn encode(identity: &Identity, amount: &Amount) -> [u8; ENCODED_LEAF_LEN] {
        let mut buf = [0u8; ENCODED_LEAF_LEN];
        buf[..IDENTITY_LEN].copy_from_slice(identity.as_bytes());
        buf[IDENTITY_LEN..].copy_from_slice(&amount.to_be_bytes());
        buf
    }

    /// `H(H(encode(identity, amount)))`
    pub fn leaf_hash(identity: &Identity, amount: &Amount) -> Hash32 {
        let inner = hash_bytes(&Self::encode(identity, amount));
        hash_bytes(inner.as_bytes())
    }

    /// Validate raw identity bytes and a decimal amount, then encode
    ///
    /// # Errors
    ///
    /// - `InvalidIdentity` when `identity` is not 20 bytes
    /// - `InvalidAmount` when `amount` is not a base-10 integer
    /// - `AmountOutOfRange` when it is negative or above `2^256 - 1`
    pub fn encode_raw(identity: &[u8], amount: &str) -> Result<Leaf> {
        let identity = Identity::from_slice(identity)?;
        let amount = Amount::from_dec_str(amount)?;
        Ok(Leaf::new(identity, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;

    #[test]
    fn test_encoding_layout() {
        let identity = Identity::new([0x11; 20]);
        let amount = Amount::from(0x0102u64);
        let buf = LeafEncoder::encode(&identity, &amount);
        assert_eq!(buf.len(), 52);
        assert_eq!(&buf[..20], &[0x11; 20]);
        assert!(buf[20..50].iter().all(|b| *b == 0));
        assert_eq!(&buf[50..], &[0x01, 0x02]);
    }

    #[test]
    fn test_leaf_hash_is_double_hash() {
        let identity = Identity::new([0x22; 20]);
        let amount = Amount::from(100u64);
        let once = hash_bytes(&LeafEncoder::encode(&identity, &amount));
        assert_eq!(
            LeafEncoder::leaf_hash(&identity, &amount),
            hash_bytes(once.as_bytes())
        );
        assert_ne!(LeafEncoder::leaf_hash(&identity, &amount), once);
    }

    #[test]
    fn test_encode_raw_errors() {
        assert_eq!(
            LeafEncoder::encode_raw(&[0u8; 21], "1"),
            Err(LedgerError::InvalidIdentity { len: 21 })
        );
        assert!(matches!(
            LeafEncoder::encode_raw(&[0u8; 20], "-1"),
            Err(LedgerError::AmountOutOfRange { .. })
        ));
        assert!(matches!(
            LeafEncoder::encode_raw(&[0u8; 20], "1.5"),
            Err(LedgerError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_zero_amount_is_a_valid_leaf() {
        let leaf = LeafEncoder::encode_raw(&[9u8; 20], "0").unwrap();
        assert!(leaf.amount.is_zero());
    }
}
