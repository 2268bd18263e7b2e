//! # codecommit-reconciler
//!
//! Converges a CodeCommit repository to a declared [`RepositoryConfig`].
//!
//! Call [`create`], [`read`] / [`refresh`], [`update`] or [`delete`] with a
//! [`RepositoryClient`]; the orchestrator decides which one and persists the
//! returned [`RepositoryState`].
//!
//! [`RepositoryConfig`]: codecommit_core::RepositoryConfig
//! [`RepositoryClient`]: codecommit_core::RepositoryClient
//! [`RepositoryState`]: codecommit_core::RepositoryState

pub mod dispatch;
pub mod memory;
pub mod reconciler;
pub mod resource;

pub use dispatch::changed_fields;
pub use memory::{Call, CallKind, InMemoryClient};
pub use reconciler::{create, delete, read, refresh, update, Observed, UpdateOutcome};
pub use resource::{CodeCommitRepository, Resource, ResourceRegistry, CODECOMMIT_REPOSITORY};
