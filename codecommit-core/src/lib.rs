//! codecommit-core — domain types, field schema, validation, errors and the
//! remote client capability for a managed CodeCommit repository.
//!
//! - [`types`] — newtypes and records
//! - [`schema`] — declarative field table and replacement checks
//! - [`validation`] — length constraints
//! - [`error`] — [`RemoteError`], [`ReconcileError`]
//! - [`client`] — [`RepositoryClient`]

pub mod client;
pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

pub use client::RepositoryClient;
pub use error::{ReconcileError, RemoteError};
pub use types::{
    ComputedAttributes, Field, Operation, RepositoryConfig, RepositoryMetadata, RepositoryName,
    RepositoryState,
};
