//! User configuration and state directory management.
//!
//! The configuration file is a flat list of `KEY=value` assignments living in
//! the per-user state directory. It is written once with defaults on first
//! run and only ever edited by hand afterwards.

mod paths;
pub mod templates;

pub use paths::{HOME_ENV, STATE_DIR_NAME, StatePaths};
pub use templates::Template;

use std::path::Path;

/// Image tag used when the config file does not name one
pub const DEFAULT_IMAGE: &str = "jekyll-docker:latest";

/// Host port published for `jekyll serve`
pub const DEFAULT_PORT: u16 = 4000;

/// Container engine CLI invoked for every image/container operation
pub const DEFAULT_ENGINE: &str = "docker";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Image tag built and run (`DOCKER_IMAGE`)
    pub docker_image: String,
    /// Host port mapped to the container's Jekyll port (`JEKYLL_PORT`)
    pub jekyll_port: u16,
    /// Numeric user the container runs as (`USER_ID`)
    pub user_id: u32,
    /// Numeric group the container runs as (`GROUP_ID`)
    pub group_id: u32,
    /// Engine executable (`CONTAINER_ENGINE`)
    pub container_engine: String,
}

impl Config {
    /// Built-in defaults with the current user's numeric ids.
    pub fn defaults() -> Self {
        let (user_id, group_id) = current_ids();
        Self {
            docker_image: DEFAULT_IMAGE.to_string(),
            jekyll_port: DEFAULT_PORT,
            user_id,
            group_id,
            container_engine: DEFAULT_ENGINE.to_string(),
        }
    }

    /// Load the config file over the defaults.
    ///
    /// A missing file is not an error: a warning is logged and defaults are
    /// used.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let mut config = Self::defaults();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                config.apply(&content);
                log::debug!("Loaded configuration from {}", path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "Configuration file {} not found, using defaults",
                    path.display()
                );
            }
            Err(e) => return Err(e.into()),
        }
        Ok(config)
    }

    /// Overlay `KEY=value` assignments onto this config.
    pub fn apply(&mut self, content: &str) {
        for (line_no, line) in content.lines().enumerate() {
            let Some((key, value)) = parse_line(line) else {
                continue;
            };

            match key {
                "DOCKER_IMAGE" => self.docker_image = value.to_string(),
                "CONTAINER_ENGINE" => self.container_engine = value.to_string(),
                "JEKYLL_PORT" => set_number(&mut self.jekyll_port, key, value, line_no),
                "USER_ID" => set_number(&mut self.user_id, key, value, line_no),
                "GROUP_ID" => set_number(&mut self.group_id, key, value, line_no),
                other => log::debug!("Ignoring unknown config key {} on line {}", other, line_no + 1),
            }
        }
    }

    /// `--user` value for container runs.
    pub fn user_spec(&self) -> String {
        format!("{}:{}", self.user_id, self.group_id)
    }

    /// Local URL of the served site.
    pub fn site_url(&self) -> String {
        format!("http://localhost:{}", self.jekyll_port)
    }

    /// File content written at first run.
    pub fn render(&self) -> String {
        format!(
            "# jekyll-docker configuration\n\
             # Edit values below; they are read on every invocation.\n\
             DOCKER_IMAGE={}\n\
             JEKYLL_PORT={}\n\
             USER_ID={}\n\
             GROUP_ID={}\n\
             CONTAINER_ENGINE={}\n",
            self.docker_image, self.jekyll_port, self.user_id, self.group_id, self.container_engine
        )
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    Some((key.trim(), value))
}

fn set_number<T: std::str::FromStr + std::fmt::Display>(
    field: &mut T,
    key: &str,
    value: &str,
    line_no: usize,
) {
    match value.parse() {
        Ok(parsed) => *field = parsed,
        Err(_) => log::warn!(
            "Invalid {} value '{}' on line {}, keeping {}",
            key,
            value,
            line_no + 1,
            field
        ),
    }
}

#[cfg(unix)]
fn current_ids() -> (u32, u32) {
    (users::get_current_uid(), users::get_current_gid())
}

#[cfg(not(unix))]
fn current_ids() -> (u32, u32) {
    (1000, 1000)
}
