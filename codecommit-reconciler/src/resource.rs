//! Resource capability set and the registry the orchestrator owns.
//!
//! A resource kind is a concrete type implementing [`Resource`]; the
//! orchestrator registers each kind it manages in a [`ResourceRegistry`] and
//! looks schemas up by kind name. There is no dynamic discovery.

use std::collections::BTreeMap;

use codecommit_core::{
    schema::{FieldSchema, REPOSITORY_SCHEMA},
    validation, ReconcileError, RepositoryClient, RepositoryConfig, RepositoryState,
};

use crate::reconciler;

/// Kind name of the CodeCommit repository resource.
pub const CODECOMMIT_REPOSITORY: &str = "aws_codecommit_repository";

/// Lifecycle operations for one remote object kind.
pub trait Resource {
    /// Desired-state record.
    type Config;
    /// Known state persisted by the orchestrator.
    type State;

    fn kind(&self) -> &'static str;

    fn schema(&self) -> &'static [FieldSchema];

    fn validate(&self, config: &Self::Config) -> Result<(), ReconcileError>;

    fn create(&self, config: &Self::Config) -> Result<Self::State, ReconcileError>;

    fn read(&self, known: &Self::State) -> Result<Self::State, ReconcileError>;

    fn update(
        &self,
        known: &Self::State,
        desired: &Self::Config,
    ) -> Result<Self::State, ReconcileError>;

    fn delete(&self, known: &Self::State) -> Result<(), ReconcileError>;
}

/// The CodeCommit repository resource, bound to a client.
pub struct CodeCommitRepository<'a> {
    client: &'a dyn RepositoryClient,
}

impl<'a> CodeCommitRepository<'a> {
    pub fn new(client: &'a dyn RepositoryClient) -> Self {
        Self { client }
    }
}

impl Resource for CodeCommitRepository<'_> {
    type Config = RepositoryConfig;
    type State = RepositoryState;

    fn kind(&self) -> &'static str {
        CODECOMMIT_REPOSITORY
    }

    fn schema(&self) -> &'static [FieldSchema] {
        REPOSITORY_SCHEMA
    }

    fn validate(&self, config: &RepositoryConfig) -> Result<(), ReconcileError> {
        validation::validate(config)
    }

    fn create(&self, config: &RepositoryConfig) -> Result<RepositoryState, ReconcileError> {
        reconciler::create(self.client, config)
    }

    fn read(&self, known: &RepositoryState) -> Result<RepositoryState, ReconcileError> {
        reconciler::refresh(self.client, known)
    }

    fn update(
        &self,
        known: &RepositoryState,
        desired: &RepositoryConfig,
    ) -> Result<RepositoryState, ReconcileError> {
        reconciler::update(self.client, known, desired).map(|outcome| outcome.state)
    }

    fn delete(&self, known: &RepositoryState) -> Result<(), ReconcileError> {
        reconciler::delete(self.client, &known.id)
    }
}

/// Explicit kind → schema mapping.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    schemas: BTreeMap<&'static str, &'static [FieldSchema]>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resource` under its kind. Returns `false` if the kind was already present.
    pub fn register<R: Resource>(&mut self, resource: &R) -> bool {
        self.schemas
            .insert(resource.kind(), resource.schema())
            .is_none()
    }

    pub fn schema(&self, kind: &str) -> Option<&'static [FieldSchema]> {
        self.schemas.get(kind).copied()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.keys().copied()
    }
}
