//! Declarative field schema for the repository resource.
//!
//! The orchestrator reads this table to learn which fields the user may set,
//! which ones the service assigns, and which ones force a replacement.

use crate::types::{Field, RepositoryConfig, RepositoryState};

/// Maximum length of `repository_name`, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of `description`, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Who owns a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Required,
    Optional,
    Computed,
}

/// One entry of a resource schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    /// A change can only be realised by delete-then-create.
    pub force_new: bool,
    pub max_len: Option<usize>,
}

impl FieldSchema {
    const fn computed(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Computed,
            force_new: false,
            max_len: None,
        }
    }
}

/// Schema of the CodeCommit repository resource.
pub const REPOSITORY_SCHEMA: &[FieldSchema] = &[
    FieldSchema {
        name: "repository_name",
        kind: FieldKind::Required,
        force_new: true,
        max_len: Some(MAX_NAME_LEN),
    },
    FieldSchema {
        name: "description",
        kind: FieldKind::Optional,
        force_new: false,
        max_len: Some(MAX_DESCRIPTION_LEN),
    },
    FieldSchema {
        name: "default_branch",
        kind: FieldKind::Optional,
        force_new: false,
        max_len: None,
    },
    FieldSchema::computed("arn"),
    FieldSchema::computed("repository_id"),
    FieldSchema::computed("clone_url_http"),
    FieldSchema::computed("clone_url_ssh"),
];

/// Force-new fields whose desired value differs from the known one.
///
/// A non-empty result means the orchestrator must delete and recreate.
pub fn replacement_fields(known: &RepositoryState, desired: &RepositoryConfig) -> Vec<Field> {
    let mut fields = Vec::new();
    if known.id != desired.name {
        fields.push(Field::RepositoryName);
    }
    fields
}
