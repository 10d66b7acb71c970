//! init: scaffold a new Jekyll site in the working directory.

use super::permissions::{print_manual_hint, sudo_chown};
use super::{PROJECT_MARKER, SITE_CONFIG};
use crate::cli::Context;
use crate::cli::docker::image::ensure_image_built;
use crate::cli::docker::{ContainerSpec, RunMode, argv};
use crate::config::Template;
use crate::error::Result;
use crate::utils::fs::{install_template, is_owned_by};

/// Scaffold command run inside the container
const SCAFFOLD_SCRIPT: &str = "jekyll new . --force --skip-bundle && bundle install";

/// Creates Dockerfile/.dockerignore, builds the image if needed, runs
/// `jekyll new` and `bundle install`, then repairs ownership.
pub async fn init(ctx: &Context) -> Result<()> {
    let dir = &ctx.project_dir;
    ctx.runtime
        .section(&format!("Initializing Jekyll site in {}", dir.display()))?;

    for template in Template::ALL {
        if install_template(&ctx.paths, template, dir)? {
            ctx.runtime
                .info(&format!("Created {}", template.project_name()))?;
        }
    }

    let engine = ctx.engine();
    ensure_image_built(
        &engine,
        &ctx.config.docker_image,
        &ctx.paths,
        dir,
        false,
        &ctx.runtime,
    )
    .await?;

    if dir.join(SITE_CONFIG).exists() {
        log::info!("{} exists, skipping jekyll new", SITE_CONFIG);
        ctx.runtime.info(&format!(
            "{} already exists; skipping site scaffolding",
            SITE_CONFIG
        ))?;
    } else {
        ctx.runtime.progress("Creating Jekyll site...")?;
        let spec = ContainerSpec::new(
            &ctx.config,
            dir,
            RunMode::Foreground { tty: false },
            argv(["sh", "-c", SCAFFOLD_SCRIPT]),
        );
        engine.run(&spec.to_args(), None, false).await?;
    }

    let marker = dir.join(PROJECT_MARKER);
    if !is_owned_by(&marker, ctx.config.user_id)? {
        log::warn!("{} is not owned by uid {}", marker.display(), ctx.config.user_id);
        ctx.runtime
            .warn("Some generated files are not owned by you; fixing ownership")?;
        if !sudo_chown(ctx, dir).await? {
            print_manual_hint(ctx, dir)?;
        }
    }

    ctx.runtime.success("Site initialized")?;
    ctx.runtime.println("")?;
    ctx.runtime.println("Next steps:")?;
    ctx.runtime.println(&format!(
        "  jekyll-docker serve              # preview at {}",
        ctx.config.site_url()
    ))?;
    ctx.runtime
        .println("  jekyll-docker new-post \"Title\"   # write your first post")?;
    Ok(())
}
