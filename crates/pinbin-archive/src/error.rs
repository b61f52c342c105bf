use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("archive '{}' is corrupted: {source}", path.display())]
    Corrupted { path: PathBuf, source: io::Error },

    #[error("archive entry '{}' resolves outside the destination", entry.display())]
    PathEscape { entry: PathBuf },

    #[error("symlink '{}' points outside the destination: '{}'", link.display(), target.display())]
    SymlinkEscape { link: PathBuf, target: PathBuf },

    #[error("failed to extract '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to run '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("'{program}' exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status:  ExitStatus,
        stderr:  String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
