use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Blocking filesystem operations needed to manage an install directory.
pub trait FileStore {
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;

    /// Recursively delete a directory and everything under it.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Overwrite `path` with `content`, creating it if needed. Not atomic.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
}

impl<T: FileStore + ?Sized> FileStore for &T {
    fn exists(&self, path: &Path) -> bool { (**self).exists(path) }

    fn is_dir(&self, path: &Path) -> bool { (**self).is_dir(path) }

    fn is_file(&self, path: &Path) -> bool { (**self).is_file(path) }

    fn remove_dir_all(&self, path: &Path) -> Result<()> { (**self).remove_dir_all(path) }

    fn read_to_string(&self, path: &Path) -> Result<String> { (**self).read_to_string(path) }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> { (**self).write(path, content) }
}

/// [`FileStore`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileStore;

impl FileStore for OsFileStore {
    fn exists(&self, path: &Path) -> bool { path.exists() }

    fn is_dir(&self, path: &Path) -> bool { path.is_dir() }

    fn is_file(&self, path: &Path) -> bool { path.is_file() }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| Error::Remove {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        fs::write(path, content).map_err(|e| Error::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
