//! Standalone claim verification

#![allow(clippy::result_large_err)]

use ledgerroot_core::errors::{ExError, LedgerError};
use ledgerroot_core::{
    log_op_end, log_op_error, log_op_start, Amount, Hash32, IdentityNormalizer, ProofVerifier,
};
use ledgerroot_core_types::RequestContext;
use ledgerroot_store::errors::Result;

/// A claim in display form, as published to claimants
#[derive(Debug, Clone)]
pub struct Claim {
    pub identity: String,
    pub amount: String,
    pub path: Vec<String>,
    pub root: String,
}

/// Check a claim against a root
///
/// Returns `Ok(false)` for a well-formed claim that does not verify; only
/// malformed input is an error.
pub fn verify_claim(
    claim: &Claim,
    normalizer: &dyn IdentityNormalizer,
    ctx: &RequestContext,
) -> Result<bool> {
    log_op_start!(
        "verify_claim",
        request_id = ctx.request_id.as_str(),
        identity = claim.identity.as_str()
    );
    let start = std::time::Instant::now();

    let valid = verify_claim_impl(claim, normalizer).map_err(|e| {
        let e = e.with_request_id(ctx.request_id.clone());
        log_op_error!(
            "verify_claim",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "verify_claim",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        valid = valid
    );

    Ok(valid)
}

fn verify_claim_impl(claim: &Claim, normalizer: &dyn IdentityNormalizer) -> Result<bool> {
    let lift = |e: LedgerError| ExError::from(e).with_op("verify_claim");

    let identity = normalizer.normalize(&claim.identity).map_err(lift)?;
    let amount = Amount::from_dec_str(&claim.amount).map_err(lift)?;
    let root = Hash32::from_hex(&claim.root).map_err(lift)?;
    let path = claim
        .path
        .iter()
        .map(|h| Hash32::from_hex(h))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(lift)?;

    Ok(ProofVerifier::verify(&identity, &amount, &path, &root))
}
