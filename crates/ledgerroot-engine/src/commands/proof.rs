//! Proof lookup against a persisted build

#![allow(clippy::result_large_err)]

use ledgerroot_core::errors::ExError;
use ledgerroot_core::{
    log_op_end, log_op_error, log_op_start, IdentityNormalizer, Proof, ProofGenerator,
};
use ledgerroot_core_types::RequestContext;
use ledgerroot_store::errors::Result;
use ledgerroot_store::ArtifactStore;

/// Regenerate the proof for one identity from `tree.json`
///
/// ## Errors
///
/// - `LeafNotFound`: identity not in the tree (recoverable)
/// - `CorruptArtifact`: persisted build fails validation
pub fn proof_lookup(
    identity: &str,
    store: &ArtifactStore,
    normalizer: &dyn IdentityNormalizer,
    ctx: &RequestContext,
) -> Result<Proof> {
    log_op_start!(
        "proof_lookup",
        request_id = ctx.request_id.as_str(),
        identity = identity
    );
    let start = std::time::Instant::now();

    let result = proof_lookup_impl(identity, store, normalizer).map_err(|e| {
        let e = e.with_request_id(ctx.request_id.clone());
        log_op_error!(
            "proof_lookup",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "proof_lookup",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        path_len = result.path.len()
    );

    Ok(result)
}

fn proof_lookup_impl(
    identity: &str,
    store: &ArtifactStore,
    normalizer: &dyn IdentityNormalizer,
) -> Result<Proof> {
    let identity = normalizer
        .normalize(identity)
        .map_err(|e| ExError::from(e).with_op("proof_lookup"))?;
    store.verify_integrity()?;
    let tree = store.load_tree()?;
    ProofGenerator::new(&tree)
        .proof_for(&identity)
        .map_err(ExError::from)
}
