use ledgerroot_core::logging_facility::test_capture::init_test_capture;
use ledgerroot_core::HexIdentityNormalizer;
use ledgerroot_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DEPTH, FIELD_ERR_CODE, FIELD_IDENTITY,
    FIELD_LEAF_COUNT, FIELD_REQUEST_ID, FIELD_ROOT,
};
use ledgerroot_core_types::{RequestContext, RequestId};
use ledgerroot_engine::{apply_engine_command, CommitOptions, EngineCommand, EngineCommandResult};
use ledgerroot_store::{ArtifactStore, LedgerRow};
use tempfile::TempDir;

fn row(line: usize, address: &str, amount: &str) -> LedgerRow {
    LedgerRow {
        line,
        address: address.to_string(),
        amount: amount.to_string(),
    }
}

fn events_for(
    capture: &ledgerroot_core::logging_facility::TestCapture,
    request_id: &str,
    event: &str,
) -> usize {
    capture.count_events(|e| {
        e.op.as_deref() == Some("commit_ledger")
            && e.event.as_deref() == Some(event)
            && e.field(FIELD_REQUEST_ID) == Some(request_id)
    })
}

#[test]
fn test_commit_emits_single_start_and_end() {
    let capture = init_test_capture();
    let temp_dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let rid = "log-boundary-success";
    let ctx = RequestContext::with_request_id(RequestId::from_string(rid.to_string()));

    apply_engine_command(
        EngineCommand::Commit {
            rows: vec![row(1, "0x1111111111111111111111111111111111111111", "5")],
            options: CommitOptions::default(),
        },
        &store,
        &HexIdentityNormalizer,
        &ctx,
    )
    .unwrap();

    assert_eq!(events_for(&capture, rid, EVENT_START), 1);
    assert_eq!(events_for(&capture, rid, EVENT_END), 1);
    assert_eq!(events_for(&capture, rid, EVENT_END_ERROR), 0);
}

#[test]
fn test_failed_commit_emits_error_with_code() {
    let capture = init_test_capture();
    let temp_dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let rid = "log-boundary-failure";
    let ctx = RequestContext::with_request_id(RequestId::from_string(rid.to_string()));

    let _ = apply_engine_command(
        EngineCommand::Commit {
            rows: vec![],
            options: CommitOptions::default(),
        },
        &store,
        &HexIdentityNormalizer,
        &ctx,
    );

    assert_eq!(events_for(&capture, rid, EVENT_END), 0);
    let errors: Vec<_> = capture
        .events_for_op("commit_ledger")
        .into_iter()
        .filter(|e| e.field(FIELD_REQUEST_ID) == Some(rid))
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_EMPTY_LEDGER"));
}

#[test]
fn test_boundary_events_carry_commitment_fields() {
    let capture = init_test_capture();
    let temp_dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let rid = "log-boundary-fields";
    let ctx = RequestContext::with_request_id(RequestId::from_string(rid.to_string()));
    let a = "0x1111111111111111111111111111111111111111";

    let built = apply_engine_command(
        EngineCommand::Commit {
            rows: vec![row(1, a, "5"), row(2, "0x2222222222222222222222222222222222222222", "7")],
            options: CommitOptions::default(),
        },
        &store,
        &HexIdentityNormalizer,
        &ctx,
    )
    .unwrap();
    let root = match built {
        EngineCommandResult::Commit(r) => r.root,
        other => panic!("unexpected result {other:?}"),
    };

    let end = capture
        .events_for_op("commit_ledger")
        .into_iter()
        .find(|e| e.field(FIELD_REQUEST_ID) == Some(rid) && e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.field(FIELD_ROOT), Some(root.to_hex().as_str()));
    assert_eq!(end.field(FIELD_LEAF_COUNT), Some("2"));
    assert_eq!(end.field(FIELD_DEPTH), Some("1"));

    apply_engine_command(
        EngineCommand::ProofLookup {
            identity: a.to_string(),
        },
        &store,
        &HexIdentityNormalizer,
        &ctx,
    )
    .unwrap();
    let start = capture
        .events_for_op("proof_lookup")
        .into_iter()
        .find(|e| e.field(FIELD_REQUEST_ID) == Some(rid) && e.event.as_deref() == Some(EVENT_START))
        .unwrap();
    assert_eq!(start.field(FIELD_IDENTITY), Some(a));
}
