//! Shared command context
//!
//! Turns parsed arguments into the platform service, output sink and
//! request a sync run needs.

use crate::cli::SyncArgs;
use chrono::{Local, NaiveDate};
use merge_down::actions::WorkflowOutput;
use merge_down::auth::get_github_auth;
use merge_down::error::Result;
use merge_down::platform::{GitHubService, PlatformService, parse_repo_info};
use merge_down::sync::SyncRequest;
use tracing::debug;

/// Everything a sync run needs, resolved once at start
pub struct CommandContext {
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
    /// Where step outputs go
    pub output: WorkflowOutput,
    /// Branches and date for this run
    pub request: SyncRequest,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Resolve the token
    /// - Parse owner/repo and API URL
    /// - Create the GitHub service
    /// - Fix the run date
    pub fn new(args: SyncArgs) -> Result<Self> {
        let auth = get_github_auth(args.github_token.as_deref())?;
        let platform_config = parse_repo_info(&args.repository, &args.api_url)?;

        debug!(
            owner = %platform_config.owner,
            repo = %platform_config.repo,
            api_url = %platform_config.api_url,
            auth_source = ?auth.source,
            "resolved repository"
        );

        let platform = GitHubService::new(&auth.token, platform_config)?;
        let date = args.date.unwrap_or_else(today);

        Ok(Self {
            platform: Box::new(platform),
            output: WorkflowOutput::new(args.output_file),
            request: SyncRequest {
                base: args.base,
                head: args.head,
                date,
            },
        })
    }
}

/// Run date in the runner's local time zone
fn today() -> NaiveDate {
    Local::now().date_naive()
}
