use crate::model::{Amount, Identity};
use serde::{Deserialize, Serialize};

/// One finalized `(identity, amount)` entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub identity: Identity,
    pub amount: Amount,
}

impl LedgerEntry {
    pub fn new(identity: Identity, amount: Amount) -> Self {
        Self { identity, amount }
    }
}
