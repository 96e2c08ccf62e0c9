//! Sync command - merge head into base, preparing a recovery branch on conflict

use crate::cli::SyncArgs;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, CROSS, Stylize};
use anstream::println;
use merge_down::actions::{ActionOutput, RESULT_OUTPUT, WorkflowOutput};
use merge_down::error::Result;
use merge_down::sync::{RunResult, SyncRequest, run_sync};
use merge_down::types::MergeResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Run the sync command and map the outcome to a process exit code
pub async fn run(args: SyncArgs) -> Result<ExitCode> {
    let fallback_output = WorkflowOutput::new(args.output_file.clone());

    let ctx = match CommandContext::new(args) {
        Ok(ctx) => ctx,
        Err(e) => {
            if let Err(write_error) = report_failure(&fallback_output, &e.to_string()) {
                error!(error = %e, "setup failed");
                return Err(write_error);
            }
            return Err(e);
        }
    };

    println!(
        "{} {} {} {}",
        "Merging".emphasis(),
        ctx.request.head.accent(),
        "into".muted(),
        ctx.request.base.accent()
    );

    let result = run_sync(&ctx.request, ctx.platform.as_ref(), &ctx.output).await?;
    print_summary(&ctx.request, &result);

    Ok(if result.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Arguments could not be parsed; report through `$GITHUB_OUTPUT` from the raw environment
pub fn report_usage_failure(error: &clap::Error) {
    let output = WorkflowOutput::new(std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from));
    let rendered = error.to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ");

    if let Err(e) = report_failure(&output, message) {
        anstream::eprintln!("{} could not report usage failure: {e}", "warning:".error_label());
    }
}

/// Inputs could not be resolved; still publish a `result` so later steps can branch on it
fn report_failure(output: &WorkflowOutput, message: &str) -> Result<()> {
    output.set_output(RESULT_OUTPUT, "FAILED")?;
    output.set_failed(message)
}

fn print_summary(request: &SyncRequest, result: &RunResult) {
    match result {
        RunResult::Ok(MergeResult::Merged { sha }) => {
            println!(
                "{} {}",
                format!("{CHECK} Merged").success(),
                sha.as_str().muted()
            );
        }
        RunResult::Ok(MergeResult::UpToDate) => {
            println!(
                "{} {}",
                format!("{CHECK} Up to date:").success(),
                format!("{} already contains {}", request.base, request.head).muted()
            );
        }
        RunResult::ConflictNeedsResolution(branch) => {
            println!("{}", format!("{CROSS} Merge conflict").failure());
            println!(
                "  {} {} {}",
                branch.action,
                branch.reference.accent(),
                format!("at {}", branch.reference.sha).muted()
            );
            println!(
                "  {}",
                format!(
                    "Resolve the conflict on that branch and merge it into {}",
                    request.base
                )
                .muted()
            );
        }
        RunResult::RecoveryFailed { branch, reason } => {
            println!("{}", format!("{CROSS} Merge conflict").failure());
            println!(
                "  {} {}: {}",
                "Could not prepare".failure(),
                branch.accent(),
                reason.as_str().muted()
            );
        }
        RunResult::Failed(message) => {
            println!(
                "{} {}",
                format!("{CROSS} Merge failed:").failure(),
                message.as_str().muted()
            );
        }
    }
}
