//! Server container lifecycle: serve, serve-detached, stop, clean.

use crate::cli::Context;
use crate::cli::docker::image::{CONTAINER_NAME, build_from_project, image_exists};
use crate::cli::docker::{
    ContainerSpec, Engine, RunMode, argv, container_exists, serve_command, stop_and_remove,
};
use crate::cli::ports::port_in_use;
use crate::cli::prompt::confirm;
use crate::error::{CliError, JekyllDockerError, Result};
use std::io::IsTerminal;

/// Serves the site in the foreground until the container exits.
pub async fn serve(ctx: &Context) -> Result<()> {
    let engine = ctx.engine();
    prepare_server(ctx, &engine).await?;

    let tty = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    let spec = ContainerSpec::new(
        &ctx.config,
        &ctx.project_dir,
        RunMode::Foreground { tty },
        serve_command(),
    )
    .named()
    .publish(ctx.config.jekyll_port);

    ctx.runtime.progress(&format!(
        "Serving at {} (Ctrl+C to stop)",
        ctx.config.site_url()
    ))?;
    engine.run_attached(&spec.to_args()).await
}

/// Starts the server container in the background.
pub async fn serve_detached(ctx: &Context) -> Result<()> {
    let engine = ctx.engine();
    prepare_server(ctx, &engine).await?;

    let spec = ContainerSpec::new(
        &ctx.config,
        &ctx.project_dir,
        RunMode::Detached,
        serve_command(),
    )
    .named()
    .publish(ctx.config.jekyll_port);

    let started = engine.run(&spec.to_args(), None, true).await?;
    log::info!("Started container {} ({})", CONTAINER_NAME, started.output);

    ctx.runtime.success(&format!(
        "Server running at {}",
        ctx.config.site_url()
    ))?;
    ctx.runtime
        .println(&format!("Follow logs with: {} logs -f {}", engine.program(), CONTAINER_NAME))?;
    ctx.runtime.println("Stop it with: jekyll-docker stop")?;
    Ok(())
}

/// Stops and removes the background server.
pub async fn stop(ctx: &Context) -> Result<()> {
    let engine = ctx.engine();
    if !container_exists(&engine).await? {
        log::info!("No container named {}, nothing to stop", CONTAINER_NAME);
        ctx.runtime
            .info(&format!("No container named {} is running", CONTAINER_NAME))?;
        return Ok(());
    }

    ctx.runtime
        .progress(&format!("Stopping {}...", CONTAINER_NAME))?;
    stop_and_remove(&engine).await?;
    ctx.runtime.success("Server stopped")?;
    Ok(())
}

/// Stops and removes the server container after confirmation, ignoring
/// errors.
pub async fn clean(ctx: &Context) -> Result<()> {
    let question = format!("Stop and remove the {} container?", CONTAINER_NAME);
    if !confirm(&question, &ctx.runtime).await? {
        ctx.runtime.info("Cancelled")?;
        return Ok(());
    }

    remove_container_best_effort(&ctx.engine()).await;
    ctx.runtime.success("Container removed")?;
    Ok(())
}

/// Stop and remove the server container, suppressing failures.
pub(super) async fn remove_container_best_effort(engine: &Engine<'_>) {
    for action in ["stop", "rm"] {
        if let Err(e) = engine.run(&argv([action, CONTAINER_NAME]), None, true).await {
            log::debug!("{} {} ignored: {}", action, CONTAINER_NAME, e);
        }
    }
}

/// Clears the fixed container name and the host port before a run.
async fn prepare_server(ctx: &Context, engine: &Engine<'_>) -> Result<()> {
    if container_exists(engine).await? {
        ctx.runtime.info(&format!(
            "Replacing existing container {}",
            CONTAINER_NAME
        ))?;
        stop_and_remove(engine).await?;
    }

    let port = ctx.config.jekyll_port;
    if port_in_use(port).await {
        log::error!("Port {} is already in use, not starting server", port);
        return Err(JekyllDockerError::Cli(CliError::PortInUse {
            port,
            config: ctx.paths.config_file().display().to_string(),
        }));
    }

    let image = &ctx.config.docker_image;
    if !image_exists(engine, image).await? {
        ctx.runtime
            .info(&format!("Image {} not found, building it first", image))?;
        build_from_project(engine, image, &ctx.paths, &ctx.project_dir, &ctx.runtime).await?;
    }
    Ok(())
}
