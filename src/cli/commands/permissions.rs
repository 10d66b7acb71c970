//! fix-permissions and the shared elevated chown.

use super::PROJECT_MARKER;
use crate::cli::Context;
use crate::error::{JekyllDockerError, Result};
use crate::utils::fs::{chown_recursive, is_owned_by};
use std::path::{Path, PathBuf};

/// Resets ownership of `dir` (default: the working directory) to the
/// configured user and group.
///
/// Tries `sudo chown -R` first when the project marker belongs to someone
/// else, then falls back to a plain recursive chown. Neither failure aborts;
/// the user gets the command to run by hand.
pub async fn fix_permissions(ctx: &Context, dir: Option<&Path>) -> Result<()> {
    let dir = resolve_dir(&ctx.project_dir, dir);
    if !dir.is_dir() {
        return Err(JekyllDockerError::invalid_arguments(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let owner = ctx.config.user_spec();
    ctx.runtime.progress(&format!(
        "Setting ownership of {} to {}",
        dir.display(),
        owner
    ))?;

    if !is_owned_by(&dir.join(PROJECT_MARKER), ctx.config.user_id)?
        && sudo_chown(ctx, &dir).await?
    {
        ctx.runtime.success("Ownership fixed")?;
        return Ok(());
    }

    let report = chown_recursive(&dir, ctx.config.user_id, ctx.config.group_id);
    if report.is_clean() {
        log::info!("Changed ownership of {} entries under {}", report.changed, dir.display());
        ctx.runtime.success(&format!(
            "Ownership fixed ({} entries)",
            report.changed
        ))?;
        return Ok(());
    }

    for failure in &report.failed {
        log::warn!("chown failed: {}", failure);
    }
    ctx.runtime.warn(&format!(
        "Could not change ownership of {} entries",
        report.failed.len()
    ))?;
    print_manual_hint(ctx, &dir)?;
    Ok(())
}

/// Runs `sudo chown -R uid:gid dir`.
///
/// # Returns
///
/// * `Ok(true)` - sudo succeeded
/// * `Ok(false)` - sudo is missing or failed; a warning has been printed
pub(super) async fn sudo_chown(ctx: &Context, dir: &Path) -> Result<bool> {
    if let Err(e) = which::which("sudo") {
        log::warn!("sudo not available: {}", e);
        ctx.runtime
            .warn("sudo is not available; trying without elevated privileges")?;
        return Ok(false);
    }

    let args = vec![
        "chown".to_string(),
        "-R".to_string(),
        ctx.config.user_spec(),
        dir.display().to_string(),
    ];
    match ctx.runner().run("sudo", &args, None, true).await {
        Ok(_) => Ok(true),
        Err(e) => {
            log::warn!("Elevated chown failed: {}", e);
            ctx.runtime.warn("sudo chown failed")?;
            Ok(false)
        }
    }
}

/// Tell the user how to fix ownership by hand.
pub(super) fn print_manual_hint(ctx: &Context, dir: &Path) -> Result<()> {
    ctx.runtime.println(&format!(
        "Fix it manually with: sudo chown -R {} {}",
        ctx.config.user_spec(),
        dir.display()
    ))?;
    Ok(())
}

fn resolve_dir(project_dir: &Path, dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => project_dir.join(dir),
        None => project_dir.to_path_buf(),
    }
}
