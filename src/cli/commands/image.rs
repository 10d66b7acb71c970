//! build-image and clean-all.

use super::server::remove_container_best_effort;
use crate::cli::Context;
use crate::cli::docker::image::{CONTAINER_NAME, ensure_image_built, remove_image};
use crate::cli::prompt::confirm;
use crate::error::Result;

/// Builds the configured image unless it exists and `force` is false.
pub async fn build_image(ctx: &Context, force: bool) -> Result<()> {
    ensure_image_built(
        &ctx.engine(),
        &ctx.config.docker_image,
        &ctx.paths,
        &ctx.project_dir,
        force,
        &ctx.runtime,
    )
    .await?;
    Ok(())
}

/// Removes the server container and the image after confirmation.
pub async fn clean_all(ctx: &Context) -> Result<()> {
    let image = &ctx.config.docker_image;
    let question = format!(
        "Remove the {} container and the image {}?",
        CONTAINER_NAME, image
    );
    if !confirm(&question, &ctx.runtime).await? {
        ctx.runtime.info("Cancelled")?;
        return Ok(());
    }

    let engine = ctx.engine();
    remove_container_best_effort(&engine).await;
    remove_image(&engine, image).await?;
    ctx.runtime
        .success(&format!("Removed container and image {}", image))?;
    Ok(())
}
