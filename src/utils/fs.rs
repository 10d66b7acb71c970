//! File system utilities for project directories.
//!
//! Template installation plus ownership and permission fix-ups for files
//! written by containers running as another user.

use crate::config::{StatePaths, Template};
use crate::error::Result;
use std::path::Path;

/// Copies a stored template into `project_dir` unless the project already
/// has that file.
///
/// # Returns
///
/// * `Ok(true)` - The template was written
/// * `Ok(false)` - The project file already existed
pub fn install_template(paths: &StatePaths, template: Template, project_dir: &Path) -> Result<bool> {
    let dest = project_dir.join(template.project_name());
    if dest.exists() {
        log::debug!("{} already present, not copying template", dest.display());
        return Ok(false);
    }

    let content = paths.read_template(template)?;
    std::fs::write(&dest, content)?;
    log::info!("Copied {} template to {}", template.stored_name(), dest.display());
    Ok(true)
}

/// Whether `path` is owned by `uid`. Missing files count as owned.
#[cfg(unix)]
pub fn is_owned_by(path: &Path, uid: u32) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;

    match std::fs::symlink_metadata(path) {
        Ok(metadata) => Ok(metadata.uid() == uid),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e.into()),
    }
}

#[cfg(not(unix))]
pub fn is_owned_by(_path: &Path, _uid: u32) -> Result<bool> {
    Ok(true)
}

/// Summary of a recursive ownership or mode change.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixReport {
    /// Entries changed successfully
    pub changed: usize,
    /// Entries that could not be changed, with the reason
    pub failed: Vec<String>,
}

impl FixReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Recursively chowns `dir` to `uid:gid` without following symlinks.
///
/// Per-entry failures are collected rather than aborting the walk.
#[cfg(unix)]
pub fn chown_recursive(dir: &Path, uid: u32, gid: u32) -> FixReport {
    use nix::unistd::{Gid, Uid, chown};

    let mut report = FixReport::default();
    for entry in walkdir::WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.failed.push(e.to_string());
                continue;
            }
        };
        if entry.path_is_symlink() {
            continue;
        }
        match chown(entry.path(), Some(Uid::from_raw(uid)), Some(Gid::from_raw(gid))) {
            Ok(()) => report.changed += 1,
            Err(errno) => report
                .failed
                .push(format!("{}: {}", entry.path().display(), errno.desc())),
        }
    }
    report
}

#[cfg(not(unix))]
pub fn chown_recursive(_dir: &Path, _uid: u32, _gid: u32) -> FixReport {
    FixReport::default()
}

/// Recursively sets `mode` on `dir` and everything below it.
#[cfg(unix)]
pub fn chmod_recursive(dir: &Path, mode: u32) -> FixReport {
    use std::os::unix::fs::PermissionsExt;

    let mut report = FixReport::default();
    for entry in walkdir::WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.failed.push(e.to_string());
                continue;
            }
        };
        if entry.path_is_symlink() {
            continue;
        }
        match std::fs::set_permissions(entry.path(), std::fs::Permissions::from_mode(mode)) {
            Ok(()) => report.changed += 1,
            Err(e) => report
                .failed
                .push(format!("{}: {}", entry.path().display(), e)),
        }
    }
    report
}

#[cfg(not(unix))]
pub fn chmod_recursive(_dir: &Path, _mode: u32) -> FixReport {
    FixReport::default()
}
