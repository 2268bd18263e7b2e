//! Error types for codecommit-core.

use thiserror::Error;

use crate::types::{Field, Operation, RepositoryName, RepositoryState};

/// Failure reported by a [`RepositoryClient`](crate::client::RepositoryClient).
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The addressed repository does not exist.
    #[error("repository {0} does not exist")]
    NotFound(RepositoryName),

    /// The service rejected the request (authorization, throttling, bad input, ...).
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The request never produced a service answer (timeout, connection reset, ...).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RemoteError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteError::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}

/// All errors that can arise from a lifecycle operation.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The desired record violates a static constraint. Raised before any remote call.
    #[error("{field} is {actual} characters long; the maximum is {max}")]
    Validation {
        field: Field,
        actual: usize,
        max: usize,
    },

    /// An update tried to change a field that is fixed at creation.
    #[error("changing {field} of repository {name} requires replacing it")]
    ReplacementRequired { field: Field, name: RepositoryName },

    /// The repository is gone, usually deleted out-of-band.
    #[error("{operation} failed: repository {name} not found")]
    NotFound {
        operation: Operation,
        name: RepositoryName,
    },

    /// Any other remote failure.
    #[error("{operation}{} failed for repository {name}: {source}", field_suffix(.field))]
    Remote {
        operation: Operation,
        /// Set when a single-field update call failed.
        field: Option<Field>,
        name: RepositoryName,
        #[source]
        source: RemoteError,
    },

    /// The repository was created but a follow-up call of the same create failed.
    ///
    /// `state` is committed: the repository exists under `state.id` and must
    /// be tracked, refreshed and re-updated rather than created again.
    #[error("create of repository {} was incomplete: {source}", .state.id)]
    CreateIncomplete {
        state: Box<RepositoryState>,
        #[source]
        source: Box<ReconcileError>,
    },
}

impl ReconcileError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReconcileError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReconcileError::Validation { .. })
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            ReconcileError::Validation { .. } | ReconcileError::ReplacementRequired { .. } => None,
            ReconcileError::NotFound { operation, .. }
            | ReconcileError::Remote { operation, .. } => Some(*operation),
            ReconcileError::CreateIncomplete { .. } => Some(Operation::Create),
        }
    }

    /// State that was committed before the failure, if any.
    pub fn committed_state(&self) -> Option<&RepositoryState> {
        match self {
            ReconcileError::CreateIncomplete { state, .. } => Some(state.as_ref()),
            _ => None,
        }
    }
}

fn field_suffix(field: &Option<Field>) -> String {
    match field {
        Some(field) => format!(" of {field}"),
        None => String::new(),
    }
}

/// Map a client failure into a [`ReconcileError`], keeping `NotFound` distinct.
pub fn remote_err(
    operation: Operation,
    field: Option<Field>,
    name: &RepositoryName,
    source: RemoteError,
) -> ReconcileError {
    match source {
        RemoteError::NotFound(_) => ReconcileError::NotFound {
            operation,
            name: name.clone(),
        },
        source => ReconcileError::Remote {
            operation,
            field,
            name: name.clone(),
            source,
        },
    }
}
