//! GitHub Actions step outputs and failure annotations
//!
//! The orchestrator reports through [`ActionOutput`]; [`WorkflowOutput`]
//! speaks the runner's protocol, tests record calls instead.

mod command;

pub use command::{escape_data, escape_property, format_command, format_file_command};

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Name of the single output a sync run publishes
pub const RESULT_OUTPUT: &str = "result";

/// Sink for step outputs and failure markers
pub trait ActionOutput: Send + Sync {
    /// Publish a step output
    fn set_output(&self, name: &str, value: &str) -> Result<()>;

    /// Mark the step as failed with a message
    fn set_failed(&self, message: &str) -> Result<()>;
}

/// Writes outputs the way the Actions runner expects them
#[derive(Debug, Clone, Default)]
pub struct WorkflowOutput {
    output_file: Option<PathBuf>,
}

impl WorkflowOutput {
    /// Create an output sink writing to `output_file` (usually `$GITHUB_OUTPUT`)
    ///
    /// Without a file, outputs fall back to the `::set-output` command.
    pub const fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    fn print_command(line: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }
}

impl ActionOutput for WorkflowOutput {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        debug!(name, value, "setting output");

        if let Some(path) = &self.output_file {
            let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
            let entry = format_file_command(name, value, &delimiter)?;

            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(entry.as_bytes())?;
            return Ok(());
        }

        Self::print_command(&format_command("set-output", &[("name", name)], value))
    }

    fn set_failed(&self, message: &str) -> Result<()> {
        Self::print_command(&format_command("error", &[], message))
    }
}
