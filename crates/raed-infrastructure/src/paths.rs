//! Unified path management for Raed configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/raed/              # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/raed/         # Data directory (Store Adapter)
//! ├── raed_diagnoses.json      # Diagnosis history, newest first
//! └── raed_last_page.json      # Last active page id
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "raed";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Platform-aware locations for Raed files (XDG on Linux, the platform
/// equivalents elsewhere).
pub struct RaedPaths;

impl RaedPaths {
    /// Returns the Raed configuration directory (e.g. `~/.config/raed/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the Raed data directory (e.g. `~/.local/share/raed/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
