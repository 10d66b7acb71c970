//! exec and add-gem: one-off commands in a disposable container.

use crate::cli::Context;
use crate::cli::docker::{ContainerSpec, RunMode, argv};
use crate::error::{JekyllDockerError, Result};
use crate::utils::fs::{chmod_recursive, chown_recursive};
use std::io::IsTerminal;

/// Bundler state directory inside the project
pub const BUNDLE_DIR: &str = ".bundle";

/// Runs `command` through `sh -c` in a fresh container.
pub async fn exec(ctx: &Context, command: &[String]) -> Result<()> {
    let command = command.join(" ");
    let command = command.trim();
    if command.is_empty() {
        return Err(JekyllDockerError::missing_argument(
            "command",
            "jekyll-docker exec \"<command>\"",
        ));
    }

    prepare_bundle_dir(ctx)?;
    run_in_container(ctx, argv(["sh", "-c", command])).await
}

/// Adds a gem to the Gemfile with `bundle add`.
pub async fn add_gem(ctx: &Context, name: Option<&str>) -> Result<()> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(JekyllDockerError::missing_argument(
            "gem name",
            "jekyll-docker add-gem <name>",
        ));
    }

    prepare_bundle_dir(ctx)?;
    run_in_container(ctx, argv(["bundle", "add", name])).await?;

    ctx.runtime.success(&format!("Added gem {}", name))?;
    ctx.runtime.info(
        "Restart the server to load it: jekyll-docker stop && jekyll-docker serve-detached",
    )?;
    Ok(())
}

/// Makes `.bundle` writable by whichever user the container ends up as.
///
/// Failures only produce warnings.
fn prepare_bundle_dir(ctx: &Context) -> Result<()> {
    let dir = ctx.project_dir.join(BUNDLE_DIR);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("Cannot create {}: {}", dir.display(), e);
        ctx.runtime
            .warn(&format!("Cannot create {}: {}", dir.display(), e))?;
        return Ok(());
    }

    let chown = chown_recursive(&dir, ctx.config.user_id, ctx.config.group_id);
    let chmod = chmod_recursive(&dir, 0o777);
    for failure in chown.failed.iter().chain(chmod.failed.iter()) {
        log::warn!("Bundle directory fix-up: {}", failure);
    }
    if !(chown.is_clean() && chmod.is_clean()) {
        ctx.runtime.warn(&format!(
            "Could not fully reset permissions on {}; bundler may fail to write its state",
            dir.display()
        ))?;
    }
    Ok(())
}

async fn run_in_container(ctx: &Context, command: Vec<String>) -> Result<()> {
    let tty = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    let spec = ContainerSpec::new(
        &ctx.config,
        &ctx.project_dir,
        RunMode::Foreground { tty },
        command,
    );
    ctx.engine().run_attached(&spec.to_args()).await
}
