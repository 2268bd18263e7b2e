//! End-to-end lifecycle tests against the in-memory client.

use std::io;

use codecommit_core::{
    Field, Operation, ReconcileError, RemoteError, RepositoryConfig, RepositoryName,
};
use codecommit_reconciler::{
    create, delete, read, refresh, update, Call, CallKind, InMemoryClient,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// 1. Full scenario
// ---------------------------------------------------------------------------

#[test]
fn create_update_delete_infra_repo() {
    init_logging();
    let client = InMemoryClient::new();
    let desired = RepositoryConfig::new("infra-repo").with_description("core infra");

    let state = create(&client, &desired).expect("create");
    assert_eq!(state.id, RepositoryName::from("infra-repo"));
    assert!(!state.computed.repository_id.is_empty());
    assert_eq!(state.computed.arn, "arn:aws:codecommit:us-east-1:123456789012:infra-repo");
    assert!(state.computed.clone_url_http.starts_with("https://"));
    assert!(state.computed.clone_url_ssh.starts_with("ssh://"));
    assert_eq!(state.config.default_branch, None);

    client.clear_calls();
    let outcome = update(&client, &state, &desired.clone().with_default_branch("release"))
        .expect("update");
    assert_eq!(outcome.applied, vec![Field::DefaultBranch]);
    assert_eq!(
        client.calls(),
        vec![
            Call::UpdateDefaultBranch {
                name: state.id.clone(),
                branch: "release".to_string(),
            },
            Call::Get { name: state.id.clone() },
        ]
    );
    assert_eq!(outcome.state.config.default_branch.as_deref(), Some("release"));

    delete(&client, &outcome.state.id).expect("delete");
    let err = read(&client, &outcome.state.id).unwrap_err();
    assert!(err.is_not_found(), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Create
// ---------------------------------------------------------------------------

#[test]
fn create_then_read_reports_identical_attributes() {
    let client = InMemoryClient::new();
    let state = create(&client, &RepositoryConfig::new("infra-repo")).expect("create");
    let observed = read(&client, &state.id).expect("read");
    assert_eq!(observed.computed, state.computed);
    assert_eq!(refresh(&client, &state).expect("refresh"), state);
}

#[test]
fn create_sends_empty_description_when_absent() {
    let client = InMemoryClient::new();
    create(&client, &RepositoryConfig::new("infra-repo")).expect("create");
    assert_eq!(
        client.calls(),
        vec![Call::Create {
            name: RepositoryName::from("infra-repo"),
            description: String::new(),
        }]
    );
}

#[test]
fn long_name_fails_before_any_remote_call() {
    let client = InMemoryClient::new();
    let err = create(&client, &RepositoryConfig::new("x".repeat(101))).unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::Validation { field: Field::RepositoryName, actual: 101, max: 100 }
    ));
    assert!(client.calls().is_empty());
}

#[test]
fn failed_create_returns_wrapped_cause() {
    let client = InMemoryClient::new();
    client.fail_next(
        CallKind::Create,
        RemoteError::Transport(Box::new(io::Error::new(io::ErrorKind::TimedOut, "timed out"))),
    );
    let err = create(&client, &RepositoryConfig::new("infra-repo")).unwrap_err();
    match &err {
        ReconcileError::Remote { operation, field, source, .. } => {
            assert_eq!(*operation, Operation::Create);
            assert_eq!(*field, None);
            assert!(matches!(source, RemoteError::Transport(_)));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
    assert!(client.repository(&RepositoryName::from("infra-repo")).is_none());
}

#[test]
fn chained_branch_failure_keeps_created_identity() {
    let client = InMemoryClient::new();
    client.fail_next(
        CallKind::UpdateDefaultBranch,
        RemoteError::service("BranchDoesNotExistException", "Branch 'main' does not exist"),
    );
    let desired = RepositoryConfig::new("infra-repo").with_default_branch("main");
    let err = create(&client, &desired).unwrap_err();

    assert_eq!(err.operation(), Some(Operation::Create));
    let state = err.committed_state().expect("identity committed with the error").clone();
    assert_eq!(state.id, RepositoryName::from("infra-repo"));
    assert_eq!(state.config.default_branch, None);
    let meta = client.repository(&state.id).expect("repository exists remotely");
    assert_eq!(state.computed.repository_id, meta.repository_id);
    assert_eq!(state.computed.arn, meta.arn);
    assert_eq!(state.computed.clone_url_http, meta.clone_url_http);
    assert_eq!(state.computed.clone_url_ssh, meta.clone_url_ssh);

    match &err {
        ReconcileError::CreateIncomplete { source, .. } => assert!(matches!(
            source.as_ref(),
            ReconcileError::Remote {
                operation: Operation::Update,
                field: Some(Field::DefaultBranch),
                ..
            }
        )),
        other => panic!("expected incomplete create, got {other:?}"),
    }

    // The committed state converges through update; no second create.
    let outcome = update(&client, &state, &desired).expect("retry via update");
    assert_eq!(outcome.applied, vec![Field::DefaultBranch]);
    assert_eq!(outcome.state.config.default_branch.as_deref(), Some("main"));
    assert_eq!(client.count(CallKind::Create), 1);
}

// ---------------------------------------------------------------------------
// 3. Read and drift
// ---------------------------------------------------------------------------

#[test]
fn out_of_band_delete_is_not_found() {
    init_logging();
    let client = InMemoryClient::new();
    let state = create(&client, &RepositoryConfig::new("infra-repo")).expect("create");
    assert!(client.remove_out_of_band(&state.id));

    let err = refresh(&client, &state).unwrap_err();
    assert!(matches!(err, ReconcileError::NotFound { operation: Operation::Read, .. }));
}

#[test]
fn other_read_failures_are_not_not_found() {
    let client = InMemoryClient::new();
    let state = create(&client, &RepositoryConfig::new("infra-repo")).expect("create");
    client.fail_next(CallKind::Get, RemoteError::service("AccessDeniedException", "denied"));

    let err = read(&client, &state.id).unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(err.operation(), Some(Operation::Read));
}

#[test]
fn read_adopts_branch_set_out_of_band() {
    let client = InMemoryClient::new();
    let state = create(&client, &RepositoryConfig::new("infra-repo")).expect("create");
    client.set_default_branch_out_of_band(&state.id, "trunk");

    let refreshed = refresh(&client, &state).expect("refresh");
    assert_eq!(refreshed.config.default_branch.as_deref(), Some("trunk"));
    assert_eq!(refreshed.computed, state.computed);
}

// ---------------------------------------------------------------------------
// 4. Delete
// ---------------------------------------------------------------------------

#[test]
fn failed_delete_is_not_retried() {
    let client = InMemoryClient::new();
    let state = create(&client, &RepositoryConfig::new("infra-repo")).expect("create");
    client.fail_next(CallKind::Delete, RemoteError::service("ThrottlingException", "slow down"));

    let err = delete(&client, &state.id).unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Delete));
    assert_eq!(client.count(CallKind::Delete), 1);
    assert!(client.repository(&state.id).is_some());
}
