//! Platform services for the hosting API
//!
//! Abstracts the four remote calls a sync run needs, so the orchestrator can
//! be driven by GitHub in production and by an in-memory fake in tests.

mod detection;
mod github;

pub use detection::{normalize_api_url, parse_repo_info};
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Branch, BranchRef, MergeResult, PlatformConfig};
use async_trait::async_trait;

/// Platform service trait for branch and ref operations
///
/// Implementations classify failures into structured errors:
/// a conflicting merge is [`Error::MergeConflict`], a ref that already
/// exists is [`Error::ReferenceExists`] and a missing branch is
/// [`Error::BranchNotFound`].
///
/// [`Error::MergeConflict`]: crate::error::Error::MergeConflict
/// [`Error::ReferenceExists`]: crate::error::Error::ReferenceExists
/// [`Error::BranchNotFound`]: crate::error::Error::BranchNotFound
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Merge `head` into `base` with the given commit message
    async fn merge_branches(&self, base: &str, head: &str, message: &str) -> Result<MergeResult>;

    /// Look up a branch and the commit it points at
    async fn get_branch(&self, name: &str) -> Result<Branch>;

    /// Create a fully qualified ref (`refs/heads/<name>`) at `sha`
    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<BranchRef>;

    /// Move an existing ref (`heads/<name>`) to `sha`
    ///
    /// With `force` the update succeeds even when it is not a fast-forward.
    async fn update_ref(&self, ref_name: &str, sha: &str, force: bool) -> Result<BranchRef>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
