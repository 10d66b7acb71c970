//! Handle on the container engine CLI.

use crate::cli::RuntimeConfig;
use crate::cli::process::{CommandOutput, CommandRunner};
use crate::error::Result;
use std::path::Path;

/// The engine executable plus the runner used to invoke it.
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    program: String,
    runner: CommandRunner<'a>,
}

impl<'a> Engine<'a> {
    pub fn new(program: impl Into<String>, runtime_config: &'a RuntimeConfig) -> Self {
        Self {
            program: program.into(),
            runner: CommandRunner::new(runtime_config),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `<engine> args...` with captured output.
    pub async fn run(&self, args: &[String], cwd: Option<&Path>, quiet: bool) -> Result<CommandOutput> {
        self.runner.run(&self.program, args, cwd, quiet).await
    }

    /// `<engine> args...` attached to the terminal.
    pub async fn run_attached(&self, args: &[String]) -> Result<()> {
        self.runner.run_attached(&self.program, args).await
    }

    /// `<engine> args...` as a query.
    pub async fn probe(&self, args: &[String]) -> Result<CommandOutput> {
        self.runner.probe(&self.program, args).await
    }
}

/// Convert string literals into an owned argument vector.
pub fn argv<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter().map(Into::into).collect()
}
