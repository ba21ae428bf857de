//! Configuration loading.
//!
//! Reads `RaedConfig` from `~/.config/raed/config.toml` (or an explicit path)
//! and applies environment overrides on top.

use std::fs;
use std::path::{Path, PathBuf};

use raed_core::config::RaedConfig;
use raed_core::error::{RaedError, Result};

use crate::paths::RaedPaths;

/// Overrides `endpoint`.
pub const ENDPOINT_ENV: &str = "RAED_ENDPOINT";
/// Overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "RAED_DATA_DIR";

/// Loads configuration from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Uses the platform config file location.
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Uses an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Loads the file, then applies process environment overrides.
    pub fn load(&self) -> Result<RaedConfig> {
        let config = self.load_file()?;
        Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Loads the file only. A missing file yields the defaults; a file that
    /// does not parse is a `Config` error.
    pub fn load_file(&self) -> Result<RaedConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => RaedPaths::config_file().map_err(|e| RaedError::config(e.to_string()))?,
        };
        load_from_path(&path)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_from_path(path: &Path) -> Result<RaedConfig> {
    if !path.exists() {
        tracing::debug!("Config file not found at {:?}, using defaults", path);
        return Ok(RaedConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: RaedConfig = toml::from_str(&contents).map_err(|e| {
        RaedError::config(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Applies `RAED_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: RaedConfig, lookup: F) -> RaedConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
        config.endpoint = endpoint;
    }
    if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
        config.data_dir = Some(PathBuf::from(dir));
    }
    config
}

/// Resolves the Store Adapter directory: explicit config first, then the
/// platform data dir.
pub fn resolve_data_dir(config: &RaedConfig) -> Result<PathBuf> {
    match &config.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => RaedPaths::data_dir().map_err(|e| RaedError::config(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raed_core::config::SubmissionPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(loader.load_file().unwrap(), RaedConfig::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint = \"http://127.0.0.1:8787\"\nrequest_timeout_ms = 1500\nsubmission_policy = \"allow\"\n",
        )
        .unwrap();

        let config = ConfigLoader::with_path(&path).load_file().unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:8787");
        assert_eq!(config.request_timeout_ms, Some(1500));
        assert_eq!(config.submission_policy, SubmissionPolicy::Allow);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "endpoint = [").unwrap();

        let err = ConfigLoader::with_path(&path).load_file().unwrap_err();
        assert!(matches!(err, RaedError::Config(_)));
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let config = apply_env_overrides(RaedConfig::default(), |key| match key {
            ENDPOINT_ENV => Some("http://override".to_string()),
            DATA_DIR_ENV => Some("/tmp/raed-data".to_string()),
            _ => None,
        });

        assert_eq!(config.endpoint, "http://override");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/raed-data")));
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let config = apply_env_overrides(RaedConfig::default(), |_| Some("  ".to_string()));
        assert_eq!(config, RaedConfig::default());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = RaedConfig {
            data_dir: Some(PathBuf::from("/srv/raed")),
            ..RaedConfig::default()
        };
        assert_eq!(resolve_data_dir(&config).unwrap(), PathBuf::from("/srv/raed"));
    }
}
