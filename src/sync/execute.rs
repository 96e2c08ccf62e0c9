//! Sync execution - effectful operations
//!
//! Runs one merge attempt, classifies the outcome, prepares a recovery
//! branch on conflict and reports the single `result` output.

use crate::actions::{ActionOutput, RESULT_OUTPUT};
use crate::error::Result;
use crate::platform::PlatformService;
use crate::sync::naming::{merge_commit_message, recovery_branch_name};
use crate::sync::recovery::ensure_branch;
use crate::types::{MergeOutcome, MergeResult, RecoveryBranch};
use chrono::NaiveDate;
use tracing::{debug, error, info};

/// Failure annotation for a conflicting merge
pub const CONFLICT_MESSAGE: &str = "Conflict needs to be resolved, abort merging down";

/// Failure annotation for anything that is not a conflict
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Inputs of a single sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Branch receiving the merge
    pub base: String,
    /// Branch being merged in
    pub head: String,
    /// Date used to name the recovery branch
    pub date: NaiveDate,
}

/// Final state of a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Head merged into base (or nothing to merge)
    Ok(MergeResult),
    /// Merge conflicted; the recovery branch is ready for a human
    ConflictNeedsResolution(RecoveryBranch),
    /// Merge conflicted and the recovery branch could not be prepared
    RecoveryFailed {
        /// Recovery branch name that was attempted
        branch: String,
        /// Underlying error message
        reason: String,
    },
    /// Merge failed for any other reason
    Failed(String),
}

impl RunResult {
    /// Whether the step must end with a failed status
    pub const fn is_failure(&self) -> bool {
        !matches!(self, Self::Ok(_))
    }

    /// Value published as the `result` output
    pub fn output_value(&self) -> String {
        match self {
            Self::Ok(_) => "OK".to_string(),
            Self::ConflictNeedsResolution(branch) => branch.reference.to_string(),
            Self::RecoveryFailed { .. } | Self::Failed(_) => "FAILED".to_string(),
        }
    }

    /// Failure annotation, if the run failed
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Ok(_) => None,
            Self::ConflictNeedsResolution(_) => Some(CONFLICT_MESSAGE.to_string()),
            Self::RecoveryFailed { branch, reason } => Some(format!(
                "{CONFLICT_MESSAGE}; recovery branch '{branch}' could not be prepared: {reason}"
            )),
            Self::Failed(_) => Some(UNKNOWN_ERROR_MESSAGE.to_string()),
        }
    }
}

/// Run the sync (EFFECTFUL)
///
/// Exactly one merge attempt, exactly one `result` output and at most one
/// failure annotation. Remote failures become a [`RunResult`]; only a
/// failure to write the outputs themselves is returned as an error.
pub async fn run_sync(
    request: &SyncRequest,
    platform: &dyn PlatformService,
    output: &dyn ActionOutput,
) -> Result<RunResult> {
    let base = request.base.as_str();
    let head = request.head.as_str();
    let message = merge_commit_message(head);

    let config = platform.config();
    debug!(owner = %config.owner, repo = %config.repo, base, head, "starting sync");

    let outcome = MergeOutcome::from(platform.merge_branches(base, head, &message).await);

    let result = match outcome {
        MergeOutcome::Success(merge) => {
            match &merge {
                MergeResult::Merged { sha } => info!(base, head, %sha, "merged"),
                MergeResult::UpToDate => info!(base, head, "already up to date"),
            }
            RunResult::Ok(merge)
        }
        MergeOutcome::Conflict => {
            error!(base, head, "merge conflict: could not merge {head} into {base}");
            let branch_name = recovery_branch_name(head, request.date);

            match ensure_branch(platform, &branch_name, head).await {
                Ok(branch) => RunResult::ConflictNeedsResolution(branch),
                Err(e) => {
                    error!(branch = %branch_name, error = %e, "error creating recovery branch");
                    RunResult::RecoveryFailed {
                        branch: branch_name,
                        reason: e.to_string(),
                    }
                }
            }
        }
        MergeOutcome::OtherError(message) => {
            error!(base, head, error = %message, "error merging branches");
            RunResult::Failed(message)
        }
    };

    output.set_output(RESULT_OUTPUT, &result.output_value())?;
    if let Some(message) = result.failure_message() {
        output.set_failed(&message)?;
    }

    Ok(result)
}
