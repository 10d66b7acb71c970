//! help and version output.

use crate::cli::Context;
use crate::error::Result;

const USAGE: &str = "\
Usage: jekyll-docker [OPTIONS] <COMMAND> [ARGS]

Commands:
  init                     Create a new Jekyll site in the current directory
  serve                    Serve the site in the foreground
  serve-detached           Serve the site in the background
  stop                     Stop the background server
  new-post \"<title>\"       Create a new post in _posts/
  exec \"<command>\"         Run a shell command inside the container
  add-gem <name>           Add a gem to the Gemfile
  open                     Open the site in a browser
  fix-permissions [dir]    Reset file ownership to your user
  build-image [--force]    Build the container image
  clean                    Stop and remove the server container
  clean-all                Remove the server container and the image
  version                  Print the version
  help                     Print this help

Options:
  -y, --yes                Answer yes to confirmation prompts
  -v, --verbose            Echo external commands before running them
      --home <DIR>         State directory [env: JEKYLL_DOCKER_HOME]
  -h, --help               Print this help";

/// Prints usage plus the resolved configuration.
pub fn print_usage(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    println!(
        "jekyll-docker {} - run Jekyll in a container\n",
        env!("CARGO_PKG_VERSION")
    );
    println!("{}\n", USAGE);
    println!(
        "Current configuration ({}):",
        ctx.paths.config_file().display()
    );
    println!("  DOCKER_IMAGE={}", config.docker_image);
    println!("  JEKYLL_PORT={}", config.jekyll_port);
    println!("  USER_ID={}", config.user_id);
    println!("  GROUP_ID={}", config.group_id);
    println!("  CONTAINER_ENGINE={}", config.container_engine);
    println!("\nLog file: {}", ctx.paths.log_file().display());
    Ok(())
}

pub fn print_version(_ctx: &Context) -> Result<()> {
    println!("jekyll-docker {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
