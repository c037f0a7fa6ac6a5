use ledgerroot_core::{Amount, Identity, LedgerEntry};

/// Identity with every byte set to `byte`
#[allow(dead_code)]
pub fn identity(byte: u8) -> Identity {
    Identity::new([byte; 20])
}

#[allow(dead_code)]
pub fn entry(byte: u8, amount: u64) -> LedgerEntry {
    LedgerEntry::new(identity(byte), Amount::from(amount))
}

/// The three-entry ledger `[(A,100), (B,50), (C,25)]`
#[allow(dead_code)]
pub fn abc_ledger() -> Vec<LedgerEntry> {
    vec![entry(0xaa, 100), entry(0xbb, 50), entry(0xcc, 25)]
}

/// `n` distinct entries with varying amounts
#[allow(dead_code)]
pub fn ledger_of(n: usize) -> Vec<LedgerEntry> {
    (0..n)
        .map(|i| {
            let mut raw = [0u8; 20];
            raw[12..].copy_from_slice(&(i as u64).to_be_bytes());
            LedgerEntry::new(Identity::new(raw), Amount::from((i as u64 + 1) * 1_000))
        })
        .collect()
}
