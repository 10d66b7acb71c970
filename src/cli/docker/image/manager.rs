//! Image existence checks, ensure-built and removal.

use crate::cli::RuntimeConfig;
use crate::cli::docker::engine::{Engine, argv};
use crate::config::{StatePaths, Template};
use crate::error::Result;
use crate::utils::fs::install_template;
use std::path::Path;

use super::builder::build_docker_image;

/// What [`ensure_image_built`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The image existed and no rebuild was requested
    AlreadyPresent,
    /// The engine built the image
    Built,
}

/// Checks whether `image` exists locally.
pub async fn image_exists(engine: &Engine<'_>, image: &str) -> Result<bool> {
    let inspect = engine.probe(&argv(["image", "inspect", image])).await?;
    Ok(inspect.success())
}

/// Ensures the image is built.
///
/// Skips the build when the image exists and `force_rebuild` is false.
/// Otherwise installs the stored Dockerfile template into `project_dir` if
/// the project has none, then builds.
///
/// # Returns
///
/// * `Ok(BuildOutcome)` - The image is present
/// * `Err` - The Dockerfile could not be written or the build failed
pub async fn ensure_image_built(
    engine: &Engine<'_>,
    image: &str,
    paths: &StatePaths,
    project_dir: &Path,
    force_rebuild: bool,
    runtime_config: &RuntimeConfig,
) -> Result<BuildOutcome> {
    if !force_rebuild && image_exists(engine, image).await? {
        log::info!("Image {} already exists, skipping build", image);
        runtime_config.info(&format!(
            "Image {} already exists. Use build-image --force to rebuild.",
            image
        ))?;
        return Ok(BuildOutcome::AlreadyPresent);
    }

    if force_rebuild {
        runtime_config.progress("Force rebuilding image (--force)...")?;
    }
    build_from_project(engine, image, paths, project_dir, runtime_config).await?;
    Ok(BuildOutcome::Built)
}

/// Installs the Dockerfile template if the project has none, then builds.
pub async fn build_from_project(
    engine: &Engine<'_>,
    image: &str,
    paths: &StatePaths,
    project_dir: &Path,
    runtime_config: &RuntimeConfig,
) -> Result<()> {
    if install_template(paths, Template::Dockerfile, project_dir)? {
        runtime_config.info("Created Dockerfile from template")?;
    }
    build_docker_image(engine, image, project_dir, runtime_config).await
}

/// Removes the image, ignoring whether it existed.
pub async fn remove_image(engine: &Engine<'_>, image: &str) -> Result<()> {
    if let Err(e) = engine.run(&argv(["rmi", "-f", image]), None, true).await {
        log::warn!("Removing image {} failed: {}", image, e);
    }
    Ok(())
}
