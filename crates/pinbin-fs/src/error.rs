use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove '{}': {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },
}

impl Error {
    /// Path the failed operation was applied to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::Remove { path, .. } => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } | Self::Remove { source, .. } => {
                source.kind()
            }
        }
    }

    pub fn is_not_found(&self) -> bool { self.kind() == io::ErrorKind::NotFound }

    /// Set when a text read hit bytes that are not valid UTF-8.
    pub fn is_invalid_data(&self) -> bool { self.kind() == io::ErrorKind::InvalidData }
}

pub type Result<T> = std::result::Result<T, Error>;
