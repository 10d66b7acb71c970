//! Container lifecycle: argument building, existence checks, stop/remove.

use super::engine::{Engine, argv};
use super::image::{CONTAINER_ENV, CONTAINER_NAME, CONTAINER_PORT, SITE_PATH};
use crate::config::Config;
use crate::error::{CliError, JekyllDockerError, Result};
use std::path::{Path, PathBuf};

/// How the container is attached to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Removed on exit, output on the caller's terminal
    Foreground { tty: bool },
    /// Left running in the background under [`CONTAINER_NAME`]
    Detached,
}

/// Description of one `run` invocation.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    image: String,
    project_dir: PathBuf,
    user: String,
    mode: RunMode,
    name: Option<String>,
    publish_port: Option<u16>,
    command: Vec<String>,
}

impl ContainerSpec {
    /// Creates a spec that mounts `project_dir` and runs as the configured user.
    ///
    /// # Arguments
    ///
    /// * `config` - Image and user/group ids
    /// * `project_dir` - Host directory mounted at the site path (must be absolute)
    /// * `mode` - Foreground or detached
    /// * `command` - Command run inside the container
    pub fn new(config: &Config, project_dir: &Path, mode: RunMode, command: Vec<String>) -> Self {
        Self {
            image: config.docker_image.clone(),
            project_dir: project_dir.to_path_buf(),
            user: config.user_spec(),
            mode,
            name: None,
            publish_port: None,
            command,
        }
    }

    /// Run under the fixed server container name.
    pub fn named(mut self) -> Self {
        self.name = Some(CONTAINER_NAME.to_string());
        self
    }

    /// Publish `host_port` to the container's Jekyll port.
    pub fn publish(mut self, host_port: u16) -> Self {
        self.publish_port = Some(host_port);
        self
    }

    /// Builds the `run` arguments.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string()];

        match self.mode {
            RunMode::Foreground { tty } => {
                args.push("--rm".to_string());
                if tty {
                    args.push("-it".to_string());
                }
            }
            RunMode::Detached => args.push("-d".to_string()),
        }

        if let Some(name) = &self.name {
            args.push("--name".to_string());
            args.push(name.clone());
        }

        args.push("-v".to_string());
        args.push(format!("{}:{}", self.project_dir.display(), SITE_PATH));
        args.push("-w".to_string());
        args.push(SITE_PATH.to_string());
        args.push("--user".to_string());
        args.push(self.user.clone());

        for (key, value) in CONTAINER_ENV {
            args.push("-e".to_string());
            args.push(format!("{}={}", key, value));
        }

        if let Some(port) = self.publish_port {
            args.push("-p".to_string());
            args.push(format!("{}:{}", port, CONTAINER_PORT));
        }

        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }
}

/// Command run by `serve` inside the container.
pub fn serve_command() -> Vec<String> {
    let script = format!(
        "bundle install && bundle exec jekyll serve --host 0.0.0.0 --port {} --force_polling",
        CONTAINER_PORT
    );
    argv(["sh", "-c", script.as_str()])
}

/// Checks whether the server container exists, running or stopped.
pub async fn container_exists(engine: &Engine<'_>) -> Result<bool> {
    let filter = format!("name=^/?{}$", CONTAINER_NAME);
    let ps = engine
        .probe(&argv(["ps", "-a", "-q", "--filter", filter.as_str()]))
        .await?;
    Ok(ps.success() && !ps.output.is_empty())
}

/// Stops then removes the server container.
///
/// A foreground server runs with `--rm`, so the engine may already have
/// removed it by the time `rm` runs. That case counts as removed.
pub async fn stop_and_remove(engine: &Engine<'_>) -> Result<()> {
    engine.run(&argv(["stop", CONTAINER_NAME]), None, true).await?;
    match engine.run(&argv(["rm", CONTAINER_NAME]), None, true).await {
        Ok(_) => log::info!("Removed container {}", CONTAINER_NAME),
        Err(JekyllDockerError::Cli(CliError::CommandFailed { output, .. }))
            if already_removed(&output) =>
        {
            log::info!("Container {} was removed on stop", CONTAINER_NAME);
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Whether an `rm` failure means the container is gone or going.
fn already_removed(output: &str) -> bool {
    let output = output.to_lowercase();
    output.contains("no such container") || output.contains("is already in progress")
}
