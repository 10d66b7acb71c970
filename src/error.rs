//! Error types for jekyll-docker operations.
//!
//! Every fatal path in the tool ends up as a [`JekyllDockerError`] returned to
//! `main`, which logs it, prints it and exits with [`JekyllDockerError::exit_code`].

use thiserror::Error;

/// Result type alias for jekyll-docker operations
pub type Result<T> = std::result::Result<T, JekyllDockerError>;

/// Main error type for all operations
#[derive(Error, Debug)]
pub enum JekyllDockerError {
    /// CLI and external command errors
    #[error(transparent)]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Front matter template errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}\nUsage: {usage}")]
    MissingArgument {
        /// Argument name
        argument: String,
        /// Usage line for the command
        usage: String,
    },

    /// Required host tool is not installed
    #[error("{tool} is not installed or not on PATH.\n{hint}")]
    PrerequisiteMissing {
        /// Tool name
        tool: String,
        /// Installation guidance
        hint: String,
    },

    /// Host port already has a listener
    #[error("Port {port} is already in use. Stop the process using it or change JEKYLL_PORT in {config}")]
    PortInUse {
        /// Configured port
        port: u16,
        /// Config file to edit
        config: String,
    },

    /// External command exited with a nonzero status
    #[error("Command failed with exit code {code}: {command}{}", format_output(.output))]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Exit code reported by the process
        code: i32,
        /// Captured output not already shown on the terminal
        output: String,
    },

    /// Command could not be started or waited on
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

impl JekyllDockerError {
    /// Process exit code for this error.
    ///
    /// External command failures propagate the command's own code; everything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cli(CliError::CommandFailed { code, .. }) if *code > 0 => *code,
            _ => 1,
        }
    }

    /// Shorthand for a missing positional argument.
    pub fn missing_argument(argument: &str, usage: &str) -> Self {
        Self::Cli(CliError::MissingArgument {
            argument: argument.to_string(),
            usage: usage.to_string(),
        })
    }

    /// Shorthand for an invalid argument.
    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        Self::Cli(CliError::InvalidArguments {
            reason: reason.into(),
        })
    }
}
