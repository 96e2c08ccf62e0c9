//! Core types for merge-down

use crate::error::{Error, Result};

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository the run operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST API base URL, without trailing slash
    pub api_url: String,
}

/// A branch as returned by a branch lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Short branch name
    pub name: String,
    /// Commit the branch currently points at
    pub sha: String,
}

/// A git reference as returned by ref creation or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Fully qualified ref name (e.g. `refs/heads/main`)
    pub ref_name: String,
    /// Commit the ref points at
    pub sha: String,
}

impl std::fmt::Display for BranchRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ref_name)
    }
}

/// Successful response of the merge endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    /// A merge commit was created
    Merged {
        /// SHA of the merge commit
        sha: String,
    },
    /// Base already contains head; nothing was written
    UpToDate,
}

/// Classified outcome of a single merge attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Merge succeeded (or there was nothing to merge)
    Success(MergeResult),
    /// Merge needs manual resolution
    Conflict,
    /// Anything else; carries the underlying message
    OtherError(String),
}

impl From<Result<MergeResult>> for MergeOutcome {
    fn from(result: Result<MergeResult>) -> Self {
        match result {
            Ok(merge) => Self::Success(merge),
            Err(Error::MergeConflict { .. }) => Self::Conflict,
            Err(e) => Self::OtherError(e.to_string()),
        }
    }
}

/// How the recovery branch came to point at its commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAction {
    /// The ref did not exist and was created
    Created,
    /// The ref existed and was force-updated
    Updated,
}

impl std::fmt::Display for BranchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Updated => write!(f, "Fast-forwarded"),
        }
    }
}

/// Recovery branch prepared after a conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryBranch {
    /// Reference now pointing at the head tip
    pub reference: BranchRef,
    /// Whether the ref was created or force-updated
    pub action: BranchAction,
}
