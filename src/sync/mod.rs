//! Branch synchronization engine
//!
//! - naming - recovery branch name and commit message (pure)
//! - recovery - ensure the recovery branch points at the head tip
//! - execute - merge attempt, outcome classification and reporting

mod execute;
mod naming;
mod recovery;

pub use execute::{CONFLICT_MESSAGE, RunResult, SyncRequest, UNKNOWN_ERROR_MESSAGE, run_sync};
pub use naming::{merge_commit_message, recovery_branch_name};
pub use recovery::ensure_branch;
