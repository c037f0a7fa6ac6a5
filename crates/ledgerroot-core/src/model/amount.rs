use crate::errors::{LedgerError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Width of the amount field in the leaf encoding
pub const AMOUNT_LEN: usize = 32;

/// Unsigned 256-bit amount stored as 32 big-endian bytes
///
/// Amounts never pass through a floating-point or fixed-width machine
/// integer; parsing and formatting work digit by digit on the byte form so
/// the full `[0, 2^256 - 1]` range round-trips exactly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount([u8; AMOUNT_LEN]);

impl Amount {
    pub const ZERO: Amount = Amount([0u8; AMOUNT_LEN]);
    pub const MAX: Amount = Amount([0xff; AMOUNT_LEN]);

    /// Wrap 32 big-endian bytes
    pub fn from_be_bytes(bytes: [u8; AMOUNT_LEN]) -> Self {
        Self(bytes)
    }

    /// Big-endian byte form, as written into the leaf preimage
    pub fn to_be_bytes(&self) -> [u8; AMOUNT_LEN] {
        self.0
    }

    /// Build from a big-endian slice of any width
    ///
    /// Leading zero bytes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` when the significant bytes exceed 32.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        let significant = &bytes[first..];
        if significant.len() > AMOUNT_LEN {
            return Err(LedgerError::AmountOutOfRange {
                value: format!("0x{}", hex::encode(significant)),
            });
        }
        let mut out = [0u8; AMOUNT_LEN];
        out[AMOUNT_LEN - significant.len()..].copy_from_slice(significant);
        Ok(Self(out))
    }

    pub fn from_u128(value: u128) -> Self {
        let mut out = [0u8; AMOUNT_LEN];
        out[AMOUNT_LEN - 16..].copy_from_slice(&value.to_be_bytes());
        Self(out)
    }

    /// # Errors
    ///
    /// Returns `AmountOutOfRange` for negative values.
    pub fn from_i128(value: i128) -> Result<Self> {
        u128::try_from(value)
            .map(Self::from_u128)
            .map_err(|_| LedgerError::AmountOutOfRange {
                value: value.to_string(),
            })
    }

    /// Parse a base-10 integer string
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` for empty input or any non-digit character
    /// - `AmountOutOfRange` for a leading `-` or a value above `2^256 - 1`
    pub fn from_dec_str(value: &str) -> Result<Self> {
        let text = value.trim();
        if text.is_empty() {
            return Err(LedgerError::InvalidAmount {
                value: value.to_string(),
                reason: "empty amount".to_string(),
            });
        }
        if let Some(rest) = text.strip_prefix('-') {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                if rest.bytes().all(|b| b == b'0') {
                    return Ok(Self::ZERO);
                }
                return Err(LedgerError::AmountOutOfRange {
                    value: text.to_string(),
                });
            }
        }

        let mut acc = [0u8; AMOUNT_LEN];
        for ch in text.bytes() {
            if !ch.is_ascii_digit() {
                return Err(LedgerError::InvalidAmount {
                    value: value.to_string(),
                    reason: format!("unexpected character '{}'", ch as char),
                });
            }
            if !mul_add_small(&mut acc, 10, u32::from(ch - b'0')) {
                return Err(LedgerError::AmountOutOfRange {
                    value: text.to_string(),
                });
            }
        }
        Ok(Self(acc))
    }

    /// Sum two amounts, `None` past `2^256 - 1`
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        let mut out = [0u8; AMOUNT_LEN];
        let mut carry = 0u16;
        for i in (0..AMOUNT_LEN).rev() {
            let sum = u16::from(self.0[i]) + u16::from(other.0[i]) + carry;
            out[i] = (sum & 0xff) as u8;
            carry = sum >> 8;
        }
        if carry != 0 {
            None
        } else {
            Some(Amount(out))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Canonical decimal form without leading zeros
    pub fn to_dec_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut work = self.0;
        let mut digits = Vec::with_capacity(78);
        while work.iter().any(|b| *b != 0) {
            let mut rem = 0u32;
            for byte in work.iter_mut() {
                let cur = (rem << 8) | u32::from(*byte);
                *byte = (cur / 10) as u8;
                rem = cur % 10;
            }
            digits.push(b'0' + rem as u8);
        }
        digits.reverse();
        String::from_utf8_lossy(&digits).into_owned()
    }
}

/// `acc = acc * mul + add` in place; false when the result leaves 256 bits
fn mul_add_small(acc: &mut [u8; AMOUNT_LEN], mul: u32, add: u32) -> bool {
    let mut carry = add;
    for byte in acc.iter_mut().rev() {
        let cur = u32::from(*byte) * mul + carry;
        *byte = (cur & 0xff) as u8;
        carry = cur >> 8;
    }
    carry == 0
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::from_u128(u128::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dec_string())
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.to_dec_string())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dec_string())
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a base-10 integer string or a non-negative integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Amount, E> {
        Amount::from_dec_str(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Amount, E> {
        Amount::from_i128(i128::from(v)).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
