//! External process execution.
//!
//! Every engine, `sudo` and opener invocation goes through [`CommandRunner`]
//! so that each call is logged and failures carry the command line and exit
//! code. Commands are argument vectors; nothing is passed through a shell
//! unless the caller asks for `sh -c` explicitly.

use crate::cli::RuntimeConfig;
use crate::error::{CliError, JekyllDockerError, Result};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Output of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    /// Captured stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs external commands on behalf of one invocation.
#[derive(Debug, Clone)]
pub struct CommandRunner<'a> {
    runtime_config: &'a RuntimeConfig,
}

impl<'a> CommandRunner<'a> {
    pub fn new(runtime_config: &'a RuntimeConfig) -> Self {
        Self { runtime_config }
    }

    /// Render a command line for logs and error messages.
    pub fn display(program: &str, args: &[String]) -> String {
        std::iter::once(program)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn announce(&self, command_line: &str) {
        log::info!("Running: {}", command_line);
        let _ = self
            .runtime_config
            .verbose_println(&format!("$ {}", command_line));
    }

    fn spawn_error(command_line: &str, e: std::io::Error) -> JekyllDockerError {
        log::error!("Failed to start {}: {}", command_line, e);
        JekyllDockerError::Cli(CliError::ExecutionFailed {
            command: command_line.to_string(),
            reason: e.to_string(),
        })
    }

    fn failure(command_line: &str, status: ExitStatus, output: String) -> JekyllDockerError {
        let code = status.code().unwrap_or(-1);
        log::error!("Command exited with code {}: {}", code, command_line);
        JekyllDockerError::Cli(CliError::CommandFailed {
            command: command_line.to_string(),
            code,
            output,
        })
    }

    /// Runs a command capturing stdout and stderr.
    ///
    /// When `quiet` is false each line is shown as it arrives; when true the
    /// output is only captured (and attached to the error on failure).
    ///
    /// # Returns
    ///
    /// * `Ok(CommandOutput)` - The command exited with status 0
    /// * `Err` - The command could not be started or exited nonzero
    pub async fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
        quiet: bool,
    ) -> Result<CommandOutput> {
        let command_line = Self::display(program, args);
        self.announce(&command_line);

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .map_err(|e| Self::spawn_error(&command_line, e))?;

        let runtime_config = self.runtime_config;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout_lines, stderr_lines) = tokio::join!(
            async move {
                let mut captured = Vec::new();
                if let Some(stdout) = stdout {
                    let mut lines = BufReader::new(stdout).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        if !quiet {
                            let _ = runtime_config.indent(&line);
                        }
                        captured.push(line);
                    }
                }
                captured
            },
            async move {
                let mut captured = Vec::new();
                if let Some(stderr) = stderr {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        if !quiet {
                            let _ = runtime_config.indent(&line);
                        }
                        captured.push(line);
                    }
                }
                captured
            }
        );

        let status = child
            .wait()
            .await
            .map_err(|e| Self::spawn_error(&command_line, e))?;

        let mut output = stdout_lines.join("\n");
        if !stderr_lines.is_empty() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&stderr_lines.join("\n"));
        }

        if !status.success() {
            let unseen = if quiet { output } else { String::new() };
            return Err(Self::failure(&command_line, status, unseen));
        }

        log::info!("Completed: {}", command_line);
        Ok(CommandOutput { status, output })
    }

    /// Runs a command attached to the terminal.
    ///
    /// Used for long-running or interactive children. An interrupt received
    /// while waiting is left to the child; the wrapper keeps waiting for it
    /// to exit and then reports its status.
    pub async fn run_attached(&self, program: &str, args: &[String]) -> Result<()> {
        let command_line = Self::display(program, args);
        self.announce(&command_line);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Self::spawn_error(&command_line, e))?;

        let finished = tokio::select! {
            status = child.wait() => Some(status),
            _ = tokio::signal::ctrl_c() => None,
        };
        let status = match finished {
            Some(status) => status,
            None => {
                log::info!("Interrupt received, waiting for {} to exit", program);
                child.wait().await
            }
        }
        .map_err(|e| Self::spawn_error(&command_line, e))?;

        if !status.success() {
            return Err(Self::failure(&command_line, status, String::new()));
        }

        log::info!("Completed: {}", command_line);
        Ok(())
    }

    /// Runs a query command and returns its output without treating a
    /// nonzero exit as an error.
    pub async fn probe(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let command_line = Self::display(program, args);
        log::debug!("Probing: {}", command_line);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Self::spawn_error(&command_line, e))?;

        Ok(CommandOutput {
            status: output.status,
            output: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        })
    }
}
