//! Domain types for a managed CodeCommit repository.
//!
//! Three layers of data flow through the reconciler:
//! - [`RepositoryConfig`] — what the user declared
//! - [`RepositoryMetadata`] — what the remote API reports
//! - [`RepositoryState`] — what the orchestrator remembers between runs
//!
//! All types are serializable via serde so the orchestrator can persist them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed repository name. Doubles as the local identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepositoryName(pub String);

impl RepositoryName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepositoryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepositoryName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// A user-settable field of the repository record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    RepositoryName,
    Description,
    DefaultBranch,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::RepositoryName => "repository_name",
            Field::Description => "description",
            Field::DefaultBranch => "default_branch",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle operation, carried by errors for context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// The desired state of a repository, as declared by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub name: RepositoryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `None` means the default branch is not managed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl RepositoryConfig {
    pub fn new(name: impl Into<RepositoryName>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_branch: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = Some(branch.into());
        self
    }

    /// Description as sent to the remote API. Absent and empty are the same.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Attributes assigned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedAttributes {
    pub repository_id: String,
    pub arn: String,
    pub clone_url_http: String,
    pub clone_url_ssh: String,
}

impl From<&RepositoryMetadata> for ComputedAttributes {
    fn from(meta: &RepositoryMetadata) -> Self {
        Self {
            repository_id: meta.repository_id.clone(),
            arn: meta.arn.clone(),
            clone_url_http: meta.clone_url_http.clone(),
            clone_url_ssh: meta.clone_url_ssh.clone(),
        }
    }
}

/// Repository metadata as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub repository_name: RepositoryName,
    pub repository_id: String,
    pub arn: String,
    pub clone_url_http: String,
    pub clone_url_ssh: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unset until the first branch is pushed or explicitly chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

/// The record the orchestrator keeps for a live repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    /// Local identity; equal to `config.name` at creation and never changed.
    pub id: RepositoryName,
    pub config: RepositoryConfig,
    pub computed: ComputedAttributes,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
