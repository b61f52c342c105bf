use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("archive not found at '{}'", path.display())]
    ArchiveMissing { path: PathBuf },

    #[error("archive checksum mismatch: expected {expected}, got {actual}")]
    ArchiveIntegrityMismatch { expected: String, actual: String },

    #[error("failed to unpack archive: {0}")]
    UnpackFailure(#[source] pinbin_archive::Error),

    #[error("archive unpacked without producing '{}'", path.display())]
    StructuralMismatch { path: PathBuf },

    #[error("could not compute checksum of '{}': {source}", path.display())]
    ChecksumUnavailable {
        path:   PathBuf,
        source: pinbin_verify::VerificationError,
    },

    #[error(transparent)]
    Store(#[from] pinbin_fs::Error),

    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
