//! Per-user state directory layout and first-run bootstrap.

use super::templates::Template;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Directory name under the home directory
pub const STATE_DIR_NAME: &str = ".jekyll-docker";

/// Environment variable overriding the state directory
pub const HOME_ENV: &str = "JEKYLL_DOCKER_HOME";

const CONFIG_FILE: &str = "config";
const LOG_FILE: &str = "jekyll-docker.log";
const TEMPLATES_DIR: &str = "templates";

/// Locations of every file the tool keeps per user.
#[derive(Debug, Clone)]
pub struct StatePaths {
    root: PathBuf,
}

impl StatePaths {
    /// Use an explicit state directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the state directory, preferring an explicit override over
    /// `~/.jekyll-docker`.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot determine the home directory. Set {} to choose a state directory.",
                HOME_ENV
            )
        })?;
        Ok(Self::new(home.join(STATE_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn template(&self, template: Template) -> PathBuf {
        self.templates_dir().join(template.stored_name())
    }

    /// Creates the state directory on first run.
    ///
    /// Writes the templates directory, an empty log file, the default
    /// configuration and both stored templates. Does nothing when the state
    /// directory already exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The directory was created
    /// * `Ok(false)` - The directory already existed
    pub fn ensure_environment(&self, default_config: &str) -> Result<bool> {
        if self.root.exists() {
            return Ok(false);
        }

        std::fs::create_dir_all(self.templates_dir())?;
        std::fs::File::create(self.log_file())?;
        std::fs::write(self.config_file(), default_config)?;
        for template in Template::ALL {
            std::fs::write(self.template(template), template.embedded())?;
        }

        Ok(true)
    }

    /// Content of a stored template, falling back to the embedded copy when
    /// the stored file has been removed.
    pub fn read_template(&self, template: Template) -> Result<String> {
        let path = self.template(template);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Stored template {} missing, using built-in copy",
                    path.display()
                );
                Ok(template.embedded().to_string())
            }
            Err(e) => Err(e.into()),
        }
    }
}
