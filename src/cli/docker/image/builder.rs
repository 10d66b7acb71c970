//! Container image building operations.

use crate::cli::RuntimeConfig;
use crate::cli::docker::engine::{Engine, argv};
use crate::error::Result;
use std::path::Path;

/// Builds the image from the Dockerfile in `project_dir`.
///
/// Build output is streamed to the terminal. A nonzero exit from the engine
/// is returned as an error.
///
/// # Arguments
///
/// * `engine` - Engine used for the build
/// * `image` - Tag for the built image
/// * `project_dir` - Build context containing the Dockerfile
/// * `runtime_config` - Runtime configuration for output
pub async fn build_docker_image(
    engine: &Engine<'_>,
    image: &str,
    project_dir: &Path,
    runtime_config: &RuntimeConfig,
) -> Result<()> {
    runtime_config.progress(&format!("Building image: {}", image))?;

    engine
        .run(&argv(["build", "-t", image, "."]), Some(project_dir), false)
        .await?;

    log::info!("Built image {}", image);
    runtime_config.success(&format!("Image {} built successfully", image))?;
    Ok(())
}
