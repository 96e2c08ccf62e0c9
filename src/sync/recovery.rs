//! Recovery branch management
//!
//! Points a side branch at the current tip of the conflicting head branch,
//! creating the ref or force-moving it when it already exists.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{BranchAction, RecoveryBranch};
use tracing::{debug, info};

/// Ensure `branch_name` exists and points at the latest commit of `source_branch`
///
/// A ref left by an earlier run is force-updated, so repeated runs converge
/// on the newest head commit. Any failure (lookup, creation, update) is
/// returned to the caller.
pub async fn ensure_branch(
    platform: &dyn PlatformService,
    branch_name: &str,
    source_branch: &str,
) -> Result<RecoveryBranch> {
    let source = platform.get_branch(source_branch).await?;
    let latest_commit_sha = source.sha;
    debug!(source_branch, sha = %latest_commit_sha, "resolved source branch tip");

    let full_ref = format!("refs/heads/{branch_name}");
    match platform.create_ref(&full_ref, &latest_commit_sha).await {
        Ok(reference) => {
            info!(branch = branch_name, "branch created");
            Ok(RecoveryBranch {
                reference,
                action: BranchAction::Created,
            })
        }
        Err(Error::ReferenceExists(_)) => {
            info!(
                branch = branch_name,
                "branch already exists, fast-forwarding to latest commit"
            );
            let reference = platform
                .update_ref(&format!("heads/{branch_name}"), &latest_commit_sha, true)
                .await?;
            info!(branch = branch_name, sha = %reference.sha, "branch fast-forwarded");
            Ok(RecoveryBranch {
                reference,
                action: BranchAction::Updated,
            })
        }
        Err(e) => Err(e),
    }
}
