//! Command line interface for jekyll-docker.
//!
//! Every invocation bootstraps the state directory, starts file logging,
//! loads the configuration, checks for the container engine and dispatches
//! to one handler in [`commands`].

mod args;
pub mod commands;
pub mod docker;
mod output;
pub mod ports;
pub mod process;
pub mod prompt;

pub use args::{Args, Commands, RuntimeConfig};
pub use output::OutputManager;

use crate::config::{Config, StatePaths};
use crate::error::Result;
use docker::Engine;
use docker::image::check_engine_available;
use process::CommandRunner;
use std::ffi::OsString;
use std::path::PathBuf;

/// Everything a command handler needs, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration loaded from the state directory
    pub config: Config,
    /// State directory layout
    pub paths: StatePaths,
    /// Working directory the command acts on
    pub project_dir: PathBuf,
    /// Output and prompt behaviour
    pub runtime: RuntimeConfig,
}

impl Context {
    /// Engine handle for the configured container engine.
    pub fn engine(&self) -> Engine<'_> {
        Engine::new(self.config.container_engine.clone(), &self.runtime)
    }

    /// Runner for non-engine host commands.
    pub fn runner(&self) -> CommandRunner<'_> {
        CommandRunner::new(&self.runtime)
    }
}

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from(&args);

    let paths = StatePaths::resolve(args.home.as_deref())?;
    let created = paths.ensure_environment(&Config::defaults().render())?;
    crate::logging::init(&paths.log_file());
    if created {
        log::info!("Initialized state directory {}", paths.root().display());
        runtime.info(&format!(
            "Created configuration in {}",
            paths.root().display()
        ))?;
    }

    let config = Config::load(&paths.config_file())?;
    log::info!("Invoked: {}", invocation_line(std::env::args_os()));

    let ctx = Context {
        config,
        paths,
        project_dir: std::env::current_dir()?,
        runtime,
    };

    let command = if args.wants_help() {
        Commands::Help
    } else {
        args.command.unwrap_or(Commands::Help)
    };

    match command {
        Commands::Help => commands::help::print_usage(&ctx)?,
        Commands::Version => commands::help::print_version(&ctx)?,
        command => {
            check_engine_available(&ctx.config.container_engine)?;
            dispatch(&ctx, command).await?;
        }
    }

    Ok(0)
}

/// Command line as logged; arguments that are not valid UTF-8 are shown lossily.
fn invocation_line(args: impl IntoIterator<Item = OsString>) -> String {
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Route a parsed command to its handler.
pub async fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Init => commands::init::init(ctx).await,
        Commands::Serve => commands::server::serve(ctx).await,
        Commands::ServeDetached => commands::server::serve_detached(ctx).await,
        Commands::Stop => commands::server::stop(ctx).await,
        Commands::NewPost { title, force } => commands::post::new_post(ctx, &title, force),
        Commands::Exec { command } => commands::exec::exec(ctx, &command).await,
        Commands::AddGem { name } => commands::exec::add_gem(ctx, name.as_deref()).await,
        Commands::Open => commands::open::open(ctx).await,
        Commands::FixPermissions { dir } => {
            commands::permissions::fix_permissions(ctx, dir.as_deref()).await
        }
        Commands::BuildImage { force } => commands::image::build_image(ctx, force).await,
        Commands::Clean => commands::server::clean(ctx).await,
        Commands::CleanAll => commands::image::clean_all(ctx).await,
        Commands::Version => commands::help::print_version(ctx),
        Commands::Help => commands::help::print_usage(ctx),
    }
}
