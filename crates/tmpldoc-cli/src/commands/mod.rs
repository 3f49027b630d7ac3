//! CLI commands

pub mod catalog;
pub mod extract;
pub mod generate;
pub mod readme;

use std::fs;
use std::path::{Path, PathBuf};
use tmpldoc_core::{CONFIG_FILE_NAME, Config};

use crate::error::{CliError, Result};

/// Load an explicit configuration file, or discover `tmpldoc.yaml` in the root
pub(crate) fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::from_file(path).map_err(|e| CliError::config(path, e)),
        None => {
            Config::discover(root).map_err(|e| CliError::config(&root.join(CONFIG_FILE_NAME), e))
        }
    }
}

/// Output directory: the command-line flag, else the configured one
pub(crate) fn output_dir(config: &Config, root: &Path, flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_path(root))
}

/// Write a generated file, creating its parent directories
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError::write(parent, e))?;
    }
    fs::write(path, content).map_err(|e| CliError::write(path, e))
}
