//! Deterministic names derived from the run inputs

use chrono::NaiveDate;

/// Commit message used for the merge commit
pub fn merge_commit_message(head: &str) -> String {
    format!("Auto merge down from {head}")
}

/// Name of the branch a conflicted run leaves behind
///
/// `<head>_sync_<DD>_<MM>_<YYYY>`; every run on the same day maps to the
/// same branch.
pub fn recovery_branch_name(head: &str, date: NaiveDate) -> String {
    format!("{head}_sync_{}", date.format("%d_%m_%Y"))
}
