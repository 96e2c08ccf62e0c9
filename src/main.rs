//! merge-down CLI

mod cli;

use clap::Parser;
use cli::style::Stylize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Keep one branch merged into another
///
/// On conflict, a `<head>_sync_<DD_MM_YYYY>` branch is created (or
/// fast-forwarded) at the head tip for manual resolution.
#[derive(Parser)]
#[command(name = "merge-down", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    sync: cli::SyncArgs,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.use_stderr() {
                cli::report_usage_failure(&e);
            }
            e.exit()
        }
    };
    init_tracing(args.verbose);

    match cli::run(args.sync).await {
        Ok(code) => code,
        Err(e) => {
            anstream::eprintln!("{} {e}", "error:".error_label());
            ExitCode::FAILURE
        }
    }
}
