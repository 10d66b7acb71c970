//! Command line argument parsing.
//!
//! Subcommands map one-to-one onto handlers in [`super::commands`].

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::HOME_ENV;

/// Run Jekyll in a container without installing Ruby locally
#[derive(Parser, Debug)]
#[command(
    name = "jekyll-docker",
    version,
    about = "Run Jekyll in a container without installing Ruby locally",
    disable_help_flag = true,
    disable_help_subcommand = true
)]
pub struct Args {
    /// Print usage and the current configuration
    #[arg(short = 'h', long, global = true, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Echo every external command before running it
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// State directory holding config, log and templates
    #[arg(long, env = HOME_ENV, value_name = "DIR", global = true)]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a new Jekyll site in the current directory
    Init,

    /// Serve the site in the foreground
    Serve,

    /// Serve the site in the background
    ServeDetached,

    /// Stop the background server
    Stop,

    /// Create a new post in _posts/
    NewPost {
        /// Post title
        #[arg(value_name = "TITLE")]
        title: Vec<String>,

        /// Overwrite a post with the same date and slug
        #[arg(long)]
        force: bool,
    },

    /// Run a shell command inside the container
    Exec {
        /// Command line passed to `sh -c`
        #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Add a gem to the site's Gemfile
    AddGem {
        /// Gem name
        name: Option<String>,
    },

    /// Open the site in a browser
    Open,

    /// Reset ownership of project files to the configured user
    FixPermissions {
        /// Directory to fix (default: current directory)
        dir: Option<PathBuf>,
    },

    /// Build the container image
    BuildImage {
        /// Rebuild even if the image exists
        #[arg(long)]
        force: bool,
    },

    /// Stop and remove the server container
    Clean,

    /// Remove the server container and the image
    CleanAll,

    /// Print the version
    Version,

    /// Print usage and the current configuration
    Help,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// True when usage should be printed instead of running a command.
    pub fn wants_help(&self) -> bool {
        self.help || matches!(self.command, None | Some(Commands::Help))
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,

    /// Skip interactive confirmations
    assume_yes: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, false),
            assume_yes: args.yes,
        }
    }
}

impl RuntimeConfig {
    pub fn new(output: super::OutputManager, assume_yes: bool) -> Self {
        Self { output, assume_yes }
    }

    pub fn assume_yes(&self) -> bool {
        self.assume_yes
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    pub fn println(&self, message: &str) -> std::io::Result<()> {
        self.output.println(message)
    }

    pub fn info(&self, message: &str) -> std::io::Result<()> {
        self.output.info(message)
    }

    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
