//! Platform-specific configuration paths.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/specid/`
/// - macOS: `~/Library/Application Support/specid/`
/// - Windows: `%APPDATA%\specid\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the default config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Pick the config file to use: an explicit path wins over the platform default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit.map_or_else(config_file_path, |path| Ok(path.to_path_buf()))
}
