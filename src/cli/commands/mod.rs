//! One handler per subcommand.

pub mod exec;
pub mod help;
pub mod image;
pub mod init;
pub mod open;
pub mod permissions;
pub mod post;
pub mod server;

/// File whose ownership tells whether a container left root-owned files behind
pub const PROJECT_MARKER: &str = "Gemfile";

/// File that marks an already scaffolded Jekyll site
pub const SITE_CONFIG: &str = "_config.yml";
