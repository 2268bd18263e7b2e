//! Field-diff dispatcher.
//!
//! The remote API has one narrow mutation endpoint per updatable field, so an
//! update is decomposed into one call per field whose desired value differs
//! from the known one. Unchanged fields are never sent: some endpoints bump
//! `last_modified_date` even when the value is identical.

use codecommit_core::{
    error::remote_err, Field, Operation, ReconcileError, RemoteError, RepositoryClient,
    RepositoryConfig, RepositoryName,
};

/// The value `desired` would push, or `None` when the field is unchanged.
type PendingFn = for<'a> fn(&RepositoryConfig, &'a RepositoryConfig) -> Option<&'a str>;
type ApplyFn = fn(&dyn RepositoryClient, &RepositoryName, &str) -> Result<(), RemoteError>;

/// One row of the dispatch table: what to send, and where to send it.
pub(crate) struct FieldUpdate {
    pub field: Field,
    pending: PendingFn,
    apply: ApplyFn,
}

/// Every field with its own update endpoint. Rows are independent of each other.
pub(crate) const UPDATABLE_FIELDS: &[FieldUpdate] = &[
    FieldUpdate {
        field: Field::DefaultBranch,
        pending: pending_default_branch,
        apply: apply_default_branch,
    },
    FieldUpdate {
        field: Field::Description,
        pending: pending_description,
        apply: apply_description,
    },
];

/// Fields that an update from `previous` to `desired` would push.
pub fn changed_fields(previous: &RepositoryConfig, desired: &RepositoryConfig) -> Vec<Field> {
    UPDATABLE_FIELDS
        .iter()
        .filter(|row| (row.pending)(previous, desired).is_some())
        .map(|row| row.field)
        .collect()
}

/// Push every changed field, stopping at the first failure.
///
/// Fields pushed before a failure stay pushed; nothing is rolled back.
pub(crate) fn apply_changes(
    client: &dyn RepositoryClient,
    name: &RepositoryName,
    previous: &RepositoryConfig,
    desired: &RepositoryConfig,
) -> Result<Vec<Field>, ReconcileError> {
    let mut applied = Vec::new();
    for row in UPDATABLE_FIELDS {
        let Some(value) = (row.pending)(previous, desired) else {
            tracing::debug!("{name}: {} unchanged", row.field);
            continue;
        };
        tracing::debug!("{name}: updating {}", row.field);
        (row.apply)(client, name, value)
            .map_err(|e| remote_err(Operation::Update, Some(row.field), name, e))?;
        applied.push(row.field);
    }
    Ok(applied)
}

// An unset desired branch is unmanaged, never a request to clear it.
fn pending_default_branch<'a>(
    previous: &RepositoryConfig,
    desired: &'a RepositoryConfig,
) -> Option<&'a str> {
    let branch = desired.default_branch.as_deref()?;
    (previous.default_branch.as_deref() != Some(branch)).then_some(branch)
}

fn pending_description<'a>(
    previous: &RepositoryConfig,
    desired: &'a RepositoryConfig,
) -> Option<&'a str> {
    let description = desired.description_or_empty();
    (previous.description_or_empty() != description).then_some(description)
}

fn apply_default_branch(
    client: &dyn RepositoryClient,
    name: &RepositoryName,
    branch: &str,
) -> Result<(), RemoteError> {
    client.update_default_branch(name, branch)
}

fn apply_description(
    client: &dyn RepositoryClient,
    name: &RepositoryName,
    description: &str,
) -> Result<(), RemoteError> {
    client.update_repository_description(name, description)
}
