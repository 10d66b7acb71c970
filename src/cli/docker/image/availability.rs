//! Container engine availability checking.

use crate::error::{CliError, JekyllDockerError};
use std::path::PathBuf;

use super::config::ENGINE_INSTALL_HELP;

/// Checks that the engine executable is on `PATH`.
///
/// # Returns
///
/// * `Ok(path)` - Resolved location of the engine
/// * `Err` - The engine is not installed
pub fn check_engine_available(program: &str) -> Result<PathBuf, JekyllDockerError> {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program, path.display());
            Ok(path)
        }
        Err(e) => {
            log::error!("{} not found in PATH: {}", program, e);
            Err(JekyllDockerError::Cli(CliError::PrerequisiteMissing {
                tool: program.to_string(),
                hint: if program == "docker" {
                    ENGINE_INSTALL_HELP.to_string()
                } else {
                    format!(
                        "Install {} or set CONTAINER_ENGINE in the config file to an installed engine.",
                        program
                    )
                },
            }))
        }
    }
}
