//! Value types for the commitment engine.
//!
//! Every type here is a fixed-width canonical form: identities are raw
//! 20-byte values, amounts are 256-bit big-endian integers and hashes are
//! 32-byte digests. Display forms only exist at the serde boundary.

pub mod amount;
pub mod entry;
pub mod hash;
pub mod identity;

pub use amount::{Amount, AMOUNT_LEN};
pub use entry::LedgerEntry;
pub use hash::{Hash32, HASH_LEN};
pub use identity::{Identity, IDENTITY_LEN};
