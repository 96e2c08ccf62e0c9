//! CLI for merge-down

mod context;
pub mod style;
mod sync;

pub use sync::{report_usage_failure, run};

use chrono::NaiveDate;
use clap::Args;
use clap::builder::NonEmptyStringValueParser;
use merge_down::types::DEFAULT_API_URL;
use std::path::PathBuf;

/// Inputs of a sync run
///
/// Every input falls back to the variable the GitHub Actions runner sets,
/// so the binary works unchanged as an action step.
#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Branch receiving the merge
    #[arg(long, env = "INPUT_BASE", value_parser = NonEmptyStringValueParser::new())]
    pub base: String,

    /// Branch being merged in
    #[arg(long, env = "INPUT_HEAD", value_parser = NonEmptyStringValueParser::new())]
    pub head: String,

    /// GitHub token (defaults to GITHUB_TOKEN or GH_TOKEN)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository as owner/repo or a remote URL
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Date used to name the recovery branch (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
