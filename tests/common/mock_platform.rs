//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_down::error::{Error, Result};
use merge_down::platform::PlatformService;
use merge_down::types::{Branch, BranchRef, MergeResult, PlatformConfig};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `merge_branches`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub base: String,
    pub head: String,
    pub message: String,
}

/// Call record for `create_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRefCall {
    pub ref_name: String,
    pub sha: String,
}

/// Call record for `update_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRefCall {
    pub ref_name: String,
    pub sha: String,
    pub force: bool,
}

/// How the mock answers `merge_branches`
#[derive(Debug, Clone)]
pub enum MergeBehavior {
    Merged(String),
    UpToDate,
    Conflict,
    Status(u16, String),
}

/// In-memory mock platform service
///
/// Features:
/// - Branch tips and refs stored in maps, so creation collides like GitHub
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    merge_behavior: Mutex<MergeBehavior>,
    /// Branch name -> tip sha
    branches: Mutex<HashMap<String, String>>,
    /// Fully qualified ref -> sha
    refs: Mutex<HashMap<String, String>>,
    // Call tracking
    merge_calls: Mutex<Vec<MergeCall>>,
    get_branch_calls: Mutex<Vec<String>>,
    create_ref_calls: Mutex<Vec<CreateRefCall>>,
    update_ref_calls: Mutex<Vec<UpdateRefCall>>,
    // Error injection
    error_on_get_branch: Mutex<Option<Error>>,
    error_on_create_ref: Mutex<Option<Error>>,
    error_on_update_ref: Mutex<Option<Error>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            merge_behavior: Mutex::new(MergeBehavior::Merged("merge_sha".to_string())),
            branches: Mutex::new(HashMap::new()),
            refs: Mutex::new(HashMap::new()),
            merge_calls: Mutex::new(Vec::new()),
            get_branch_calls: Mutex::new(Vec::new()),
            create_ref_calls: Mutex::new(Vec::new()),
            update_ref_calls: Mutex::new(Vec::new()),
            error_on_get_branch: Mutex::new(None),
            error_on_create_ref: Mutex::new(None),
            error_on_update_ref: Mutex::new(None),
        }
    }

    /// Create a mock for `test/repo`
    pub fn new() -> Self {
        Self::with_config(super::github_config())
    }

    // === Setup methods ===

    /// Set how `merge_branches` answers
    pub fn set_merge_behavior(&self, behavior: MergeBehavior) {
        *self.merge_behavior.lock().unwrap() = behavior;
    }

    /// Add or move a branch, keeping `refs/heads/<name>` in step
    pub fn set_branch(&self, name: &str, sha: &str) {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), sha.to_string());
        self.refs
            .lock()
            .unwrap()
            .insert(format!("refs/heads/{name}"), sha.to_string());
    }

    /// Make `get_branch` return an error
    pub fn fail_get_branch(&self, error: Error) {
        *self.error_on_get_branch.lock().unwrap() = Some(error);
    }

    /// Make `create_ref` return an error
    pub fn fail_create_ref(&self, error: Error) {
        *self.error_on_create_ref.lock().unwrap() = Some(error);
    }

    /// Make `update_ref` return an error
    pub fn fail_update_ref(&self, error: Error) {
        *self.error_on_update_ref.lock().unwrap() = Some(error);
    }

    // === Inspection methods ===

    /// Sha a fully qualified ref points at
    pub fn ref_sha(&self, ref_name: &str) -> Option<String> {
        self.refs.lock().unwrap().get(ref_name).cloned()
    }

    pub fn get_merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn get_branch_calls(&self) -> Vec<String> {
        self.get_branch_calls.lock().unwrap().clone()
    }

    pub fn get_create_ref_calls(&self) -> Vec<CreateRefCall> {
        self.create_ref_calls.lock().unwrap().clone()
    }

    pub fn get_update_ref_calls(&self) -> Vec<UpdateRefCall> {
        self.update_ref_calls.lock().unwrap().clone()
    }

    /// Assert that no ref was created or moved
    pub fn assert_no_ref_writes(&self) {
        let created = self.get_create_ref_calls();
        let updated = self.get_update_ref_calls();
        assert!(
            created.is_empty() && updated.is_empty(),
            "Expected no ref writes but got create: {created:?}, update: {updated:?}"
        );
    }

    /// Assert that `update_ref` was called with force for a ref
    pub fn assert_force_updated(&self, ref_name: &str, sha: &str) {
        let calls = self.get_update_ref_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.ref_name == ref_name && c.sha == sha && c.force),
            "Expected update_ref({ref_name}, {sha}, force) but got: {calls:?}"
        );
    }
}

fn take_error(slot: &Mutex<Option<Error>>) -> Option<Error> {
    slot.lock().unwrap().take()
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn merge_branches(&self, base: &str, head: &str, message: &str) -> Result<MergeResult> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            base: base.to_string(),
            head: head.to_string(),
            message: message.to_string(),
        });

        match self.merge_behavior.lock().unwrap().clone() {
            MergeBehavior::Merged(sha) => Ok(MergeResult::Merged { sha }),
            MergeBehavior::UpToDate => Ok(MergeResult::UpToDate),
            MergeBehavior::Conflict => Err(Error::MergeConflict {
                base: base.to_string(),
                head: head.to_string(),
            }),
            MergeBehavior::Status(status, message) => Err(Error::GitHubApi { status, message }),
        }
    }

    async fn get_branch(&self, name: &str) -> Result<Branch> {
        self.get_branch_calls.lock().unwrap().push(name.to_string());

        if let Some(err) = take_error(&self.error_on_get_branch) {
            return Err(err);
        }

        let branches = self.branches.lock().unwrap();
        branches
            .get(name)
            .map(|sha| Branch {
                name: name.to_string(),
                sha: sha.clone(),
            })
            .ok_or_else(|| Error::BranchNotFound(name.to_string()))
    }

    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<BranchRef> {
        self.create_ref_calls.lock().unwrap().push(CreateRefCall {
            ref_name: ref_name.to_string(),
            sha: sha.to_string(),
        });

        if let Some(err) = take_error(&self.error_on_create_ref) {
            return Err(err);
        }

        let mut refs = self.refs.lock().unwrap();
        if refs.contains_key(ref_name) {
            return Err(Error::ReferenceExists(ref_name.to_string()));
        }
        refs.insert(ref_name.to_string(), sha.to_string());

        Ok(BranchRef {
            ref_name: ref_name.to_string(),
            sha: sha.to_string(),
        })
    }

    async fn update_ref(&self, ref_name: &str, sha: &str, force: bool) -> Result<BranchRef> {
        self.update_ref_calls.lock().unwrap().push(UpdateRefCall {
            ref_name: ref_name.to_string(),
            sha: sha.to_string(),
            force,
        });

        if let Some(err) = take_error(&self.error_on_update_ref) {
            return Err(err);
        }

        // update_ref takes `heads/<name>`; stored refs are fully qualified
        let full_ref = format!("refs/{ref_name}");
        let mut refs = self.refs.lock().unwrap();
        if !refs.contains_key(&full_ref) {
            return Err(Error::GitHubApi {
                status: 422,
                message: "Reference does not exist".to_string(),
            });
        }
        refs.insert(full_ref.clone(), sha.to_string());

        Ok(BranchRef {
            ref_name: full_ref,
            sha: sha.to_string(),
        })
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
