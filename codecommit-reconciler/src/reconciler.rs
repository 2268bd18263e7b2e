//! The four lifecycle operations.
//!
//! ```text
//! ABSENT  --create-->  PRESENT
//! PRESENT --read---->  PRESENT   (refresh)
//! PRESENT --update-->  PRESENT   (changed fields pushed, then refresh)
//! PRESENT --delete-->  ABSENT
//! PRESENT --read---->  ABSENT    (NotFound: deleted out-of-band)
//! ```
//!
//! Every operation is a single synchronous pass: no caching, no retries and
//! no state kept between calls. Deciding *which* operation to run is the
//! orchestrator's job.

use codecommit_core::{
    error::remote_err, schema, validation, ComputedAttributes, Field, Operation, ReconcileError,
    RepositoryClient, RepositoryConfig, RepositoryName, RepositoryState,
};

use crate::dispatch;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Live values fetched by [`read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    pub computed: ComputedAttributes,
    /// `None` when the service reports no default branch.
    pub default_branch: Option<String>,
}

/// Outcome of [`update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Known state after the final refresh.
    pub state: RepositoryState,
    /// Fields whose update endpoint was called, in call order.
    pub applied: Vec<Field>,
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

/// Create the repository declared by `desired`.
///
/// The create endpoint takes no default branch, so a declared one is pushed
/// through [`update`] straight afterwards. If that step fails the repository
/// still exists: the error is [`ReconcileError::CreateIncomplete`] and carries
/// the committed state.
pub fn create(
    client: &dyn RepositoryClient,
    desired: &RepositoryConfig,
) -> Result<RepositoryState, ReconcileError> {
    validation::validate(desired)?;

    let name = &desired.name;
    tracing::debug!("{name}: create_repository");
    let meta = client
        .create_repository(name, desired.description_or_empty())
        .map_err(|e| remote_err(Operation::Create, None, name, e))?;

    let state = RepositoryState {
        id: name.clone(),
        config: RepositoryConfig {
            name: name.clone(),
            description: desired.description.clone(),
            default_branch: None,
        },
        computed: ComputedAttributes::from(&meta),
    };
    tracing::info!("created repository {} ({})", state.id, state.computed.repository_id);

    if desired.default_branch.is_none() {
        return Ok(state);
    }
    update(client, &state, desired)
        .map(|outcome| outcome.state)
        .map_err(|source| ReconcileError::CreateIncomplete {
            state: Box::new(state),
            source: Box::new(source),
        })
}

// ---------------------------------------------------------------------------
// read
// ---------------------------------------------------------------------------

/// Fetch the live computed attributes and default branch of `identity`.
///
/// Returns [`ReconcileError::NotFound`] when the repository no longer exists.
pub fn read(
    client: &dyn RepositoryClient,
    identity: &RepositoryName,
) -> Result<Observed, ReconcileError> {
    tracing::debug!("{identity}: get_repository");
    let meta = client.get_repository(identity).map_err(|e| {
        let err = remote_err(Operation::Read, None, identity, e);
        if err.is_not_found() {
            tracing::warn!("repository {identity} no longer exists");
        }
        err
    })?;

    Ok(Observed {
        computed: ComputedAttributes::from(&meta),
        default_branch: meta.default_branch,
    })
}

/// [`read`] `known.id` and fold the result into a new known state.
///
/// Computed attributes are always replaced. The default branch is replaced
/// only when the service reports one; otherwise the known value is kept.
pub fn refresh(
    client: &dyn RepositoryClient,
    known: &RepositoryState,
) -> Result<RepositoryState, ReconcileError> {
    let observed = read(client, &known.id)?;
    let mut state = known.clone();
    state.computed = observed.computed;
    if let Some(branch) = observed.default_branch {
        state.config.default_branch = Some(branch);
    }
    Ok(state)
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

/// Push every field that differs between `known.config` and `desired`, then
/// refresh.
///
/// A failed field call is returned at once; fields pushed before it are not
/// rolled back, so the orchestrator should refresh and diff again.
pub fn update(
    client: &dyn RepositoryClient,
    known: &RepositoryState,
    desired: &RepositoryConfig,
) -> Result<UpdateOutcome, ReconcileError> {
    validation::validate(desired)?;
    if let Some(field) = schema::replacement_fields(known, desired).into_iter().next() {
        return Err(ReconcileError::ReplacementRequired {
            field,
            name: known.id.clone(),
        });
    }

    let applied = dispatch::apply_changes(client, &known.id, &known.config, desired)?;
    if !applied.is_empty() {
        tracing::info!("updated repository {} ({} field(s))", known.id, applied.len());
    }

    let pending = RepositoryState {
        id: known.id.clone(),
        config: desired.clone(),
        computed: known.computed.clone(),
    };
    let state = refresh(client, &pending)?;
    Ok(UpdateOutcome { state, applied })
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

/// Delete the repository addressed by `identity`.
pub fn delete(
    client: &dyn RepositoryClient,
    identity: &RepositoryName,
) -> Result<(), ReconcileError> {
    tracing::debug!("{identity}: delete_repository");
    client
        .delete_repository(identity)
        .map_err(|e| remote_err(Operation::Delete, None, identity, e))?;
    tracing::info!("deleted repository {identity}");
    Ok(())
}
