//! Run the Jekyll static-site generator inside a container.
//!
//! The library backs the `jekyll-docker` binary: it keeps a small per-user
//! state directory (configuration, log, templates), drives the container
//! engine CLI for image and container operations, and scaffolds project
//! files such as posts.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, JekyllDockerError, Result};
