//! In-process [`RepositoryClient`] for tests and local dry runs.
//!
//! Behaves like the CodeCommit endpoints the reconciler uses: ids, ARNs and
//! clone URLs are assigned on create, every mutation bumps
//! `last_modified_date`, and unknown names yield [`RemoteError::NotFound`].
//! Timestamps come from a logical clock so results are deterministic.
//!
//! Every call is recorded, including failed ones, and a failure can be
//! queued for the next call of a given kind.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use codecommit_core::{RemoteError, RepositoryClient, RepositoryMetadata, RepositoryName};

/// 2023-11-14T22:13:20Z
const CLOCK_BASE_SECS: i64 = 1_700_000_000;

/// A recorded client call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { name: RepositoryName, description: String },
    Get { name: RepositoryName },
    UpdateDescription { name: RepositoryName, description: String },
    UpdateDefaultBranch { name: RepositoryName, branch: String },
    Delete { name: RepositoryName },
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::Create { .. } => CallKind::Create,
            Call::Get { .. } => CallKind::Get,
            Call::UpdateDescription { .. } => CallKind::UpdateDescription,
            Call::UpdateDefaultBranch { .. } => CallKind::UpdateDefaultBranch,
            Call::Delete { .. } => CallKind::Delete,
        }
    }
}

/// The endpoint a [`Call`] hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Create,
    Get,
    UpdateDescription,
    UpdateDefaultBranch,
    Delete,
}

#[derive(Default)]
struct Inner {
    repositories: BTreeMap<RepositoryName, RepositoryMetadata>,
    calls: Vec<Call>,
    failures: Vec<(CallKind, RemoteError)>,
    created: u64,
    tick: i64,
}

impl Inner {
    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        DateTime::<Utc>::default() + Duration::seconds(CLOCK_BASE_SECS + self.tick)
    }

    fn record(&mut self, call: Call) -> Result<(), RemoteError> {
        let kind = call.kind();
        self.calls.push(call);
        match self.failures.iter().position(|(k, _)| *k == kind) {
            Some(idx) => Err(self.failures.remove(idx).1),
            None => Ok(()),
        }
    }

    fn existing(&mut self, name: &RepositoryName) -> Result<&mut RepositoryMetadata, RemoteError> {
        self.repositories
            .get_mut(name)
            .ok_or_else(|| RemoteError::NotFound(name.clone()))
    }
}

/// Deterministic in-memory repository service.
pub struct InMemoryClient {
    region: String,
    account_id: String,
    inner: Mutex<Inner>,
}

impl Default for InMemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryClient {
    /// A client for `us-east-1` / account `123456789012`.
    pub fn new() -> Self {
        Self::with_account("us-east-1", "123456789012")
    }

    pub fn with_account(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            account_id: account_id.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn call_kinds(&self) -> Vec<CallKind> {
        self.lock().calls.iter().map(Call::kind).collect()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.lock().calls.iter().filter(|c| c.kind() == kind).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make the next call of `kind` fail with `error`. Failures queue up per kind.
    pub fn fail_next(&self, kind: CallKind, error: RemoteError) {
        self.lock().failures.push((kind, error));
    }

    /// Current service-side metadata, without recording a call.
    pub fn repository(&self, name: &RepositoryName) -> Option<RepositoryMetadata> {
        self.lock().repositories.get(name).cloned()
    }

    /// Delete a repository behind the reconciler's back.
    pub fn remove_out_of_band(&self, name: &RepositoryName) -> bool {
        self.lock().repositories.remove(name).is_some()
    }

    /// Set the default branch behind the reconciler's back, as a first push would.
    pub fn set_default_branch_out_of_band(&self, name: &RepositoryName, branch: &str) -> bool {
        let mut inner = self.lock();
        let now = inner.now();
        match inner.repositories.get_mut(name) {
            Some(meta) => {
                meta.default_branch = Some(branch.to_string());
                meta.last_modified_date = now;
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RepositoryClient for InMemoryClient {
    fn create_repository(
        &self,
        name: &RepositoryName,
        description: &str,
    ) -> Result<RepositoryMetadata, RemoteError> {
        let mut inner = self.lock();
        inner.record(Call::Create {
            name: name.clone(),
            description: description.to_string(),
        })?;
        if inner.repositories.contains_key(name) {
            return Err(RemoteError::service(
                "RepositoryNameExistsException",
                format!("Repository named {name} already exists"),
            ));
        }

        inner.created += 1;
        let now = inner.now();
        let host = format!("git-codecommit.{}.amazonaws.com", self.region);
        let meta = RepositoryMetadata {
            repository_name: name.clone(),
            repository_id: format!("{:08x}-0000-4000-8000-{:012x}", inner.created, inner.created),
            arn: format!("arn:aws:codecommit:{}:{}:{name}", self.region, self.account_id),
            clone_url_http: format!("https://{host}/v1/repos/{name}"),
            clone_url_ssh: format!("ssh://{host}/v1/repos/{name}"),
            description: (!description.is_empty()).then(|| description.to_string()),
            default_branch: None,
            creation_date: now,
            last_modified_date: now,
        };
        inner.repositories.insert(name.clone(), meta.clone());
        Ok(meta)
    }

    fn get_repository(&self, name: &RepositoryName) -> Result<RepositoryMetadata, RemoteError> {
        let mut inner = self.lock();
        inner.record(Call::Get { name: name.clone() })?;
        inner.existing(name).map(|meta| meta.clone())
    }

    fn update_repository_description(
        &self,
        name: &RepositoryName,
        description: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.record(Call::UpdateDescription {
            name: name.clone(),
            description: description.to_string(),
        })?;
        let now = inner.now();
        let meta = inner.existing(name)?;
        meta.description = (!description.is_empty()).then(|| description.to_string());
        meta.last_modified_date = now;
        Ok(())
    }

    fn update_default_branch(
        &self,
        name: &RepositoryName,
        branch: &str,
    ) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.record(Call::UpdateDefaultBranch {
            name: name.clone(),
            branch: branch.to_string(),
        })?;
        if branch.is_empty() {
            return Err(RemoteError::service(
                "BranchNameRequiredException",
                "A branch name is required",
            ));
        }
        let now = inner.now();
        let meta = inner.existing(name)?;
        meta.default_branch = Some(branch.to_string());
        meta.last_modified_date = now;
        Ok(())
    }

    fn delete_repository(&self, name: &RepositoryName) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        inner.record(Call::Delete { name: name.clone() })?;
        inner
            .repositories
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RemoteError::NotFound(name.clone()))
    }
}
