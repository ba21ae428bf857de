//! File-backed Store Adapter.

use std::path::{Path, PathBuf};

use raed_core::error::{RaedError, Result};
use raed_core::state::KeyValueStore;

use super::atomic_file::AtomicFile;

/// Stores each key as `<dir>/<key>.json`.
///
/// Values are opaque JSON text; the store neither parses nor validates them.
/// Every `set` is an atomic file replace, so a crash leaves either the old or
/// the new value, never a torn one.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(RaedError::persistence(format!(
                "Invalid store key '{}'",
                key
            )));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{}.json", key))))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        file.load().map_err(|e| {
            RaedError::persistence(format!("Failed to read {}: {}", file.path().display(), e))
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        file.save(value).map_err(|e| {
            RaedError::persistence(format!("Failed to write {}: {}", file.path().display(), e))
        })?;
        tracing::debug!(key, path = %file.path().display(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        file.remove().map_err(|e| {
            RaedError::persistence(format!("Failed to remove {}: {}", file.path().display(), e))
        })
    }
}
