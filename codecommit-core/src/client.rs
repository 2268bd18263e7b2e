//! The remote-API capability the reconciler drives.
//!
//! Transport, credentials, timeouts and retries all live behind this trait;
//! implementations report failures as [`RemoteError`] and must use
//! [`RemoteError::NotFound`] when the addressed repository does not exist.

use crate::error::RemoteError;
use crate::types::{RepositoryMetadata, RepositoryName};

/// Narrow, single-purpose repository endpoints, each addressed by name.
pub trait RepositoryClient {
    /// Create a repository. The service does not accept a default branch here.
    fn create_repository(
        &self,
        name: &RepositoryName,
        description: &str,
    ) -> Result<RepositoryMetadata, RemoteError>;

    fn get_repository(&self, name: &RepositoryName) -> Result<RepositoryMetadata, RemoteError>;

    fn update_repository_description(
        &self,
        name: &RepositoryName,
        description: &str,
    ) -> Result<(), RemoteError>;

    fn update_default_branch(
        &self,
        name: &RepositoryName,
        branch: &str,
    ) -> Result<(), RemoteError>;

    fn delete_repository(&self, name: &RepositoryName) -> Result<(), RemoteError>;
}

