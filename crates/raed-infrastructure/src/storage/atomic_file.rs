//! Atomic text file operations.
//!
//! Provides a thin layer for safe concurrent access to small JSON files.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

/// A handle to a text file that is replaced atomically on every write.
///
/// Provides:
/// - **Atomicity**: Writes go to a temp file that is renamed over the target
/// - **Isolation**: An exclusive lock file serializes writers across processes
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    /// Creates a new handle. Nothing is touched on disk until the first call.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))`: File exists and is not blank
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read the file
    pub fn load(&self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(content))
    }

    /// Replaces the file contents with `content`.
    pub fn save(&self, content: &str) -> io::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Temp file next to the target, so the rename never crosses filesystems.
    fn temp_path(&self) -> io::Result<PathBuf> {
        let parent = self.path.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory")
        })?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
///
/// The lock file stays on disk. Removing it would let a new writer lock a
/// fresh inode while another is still blocked on the old one.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> io::Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()?;
        }

        Ok(FileLock { file })
    }
}
