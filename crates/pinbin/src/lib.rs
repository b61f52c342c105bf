//! Lazily materialize and verify a vendored binary from a pinned archive.
//!
//! A scripts directory ships a compressed archive next to the tooling that
//! needs the binary inside it. [`Extractor::ensure_installed`] makes sure the
//! archive has been unpacked, that what is on disk came from an archive with
//! the pinned checksum, and returns the directory holding the binary.
//!
//! ```text
//! <scripts>/apollo.tar.gz        pinned archive, never modified
//! <scripts>/apollo/              install directory, managed
//! <scripts>/apollo/.shasum       marker: checksum of the archive it came from
//! <scripts>/apollo/bin/run       the binary
//! ```
//!
//! # Decisions
//!
//! The first matching state wins:
//!
//! 1. no install directory: extract
//! 2. marker missing or not matching the expected checksum: delete, extract
//! 3. marker fine but binary missing: delete, extract
//! 4. otherwise: return the binary directory untouched
//!
//! Extraction refuses to unpack an archive whose checksum does not match, and
//! writes the marker only after the expected layout is in place. Any
//! interrupted run leaves a state that one of the first three rules repairs.
//!
//! # Concurrency
//!
//! There is no locking. Two processes running against the same scripts
//! directory can race between the delete and the marker write; callers are
//! expected to serialize invocations.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pinbin::{Config, Extractor};
//!
//! let extractor = Extractor::from_config(&Config::from_env()?)?;
//! let bin_dir = extractor.ensure_installed(Path::new("scripts"))?;
//! println!("{}", bin_dir.join("run").display());
//! # Ok::<(), pinbin::Error>(())
//! ```

pub use config::{Config, PINNED_SHA256, UnpackerKind};
pub use error::{Error, Result};
pub use extractor::{Extractor, InstallState, SystemExtractor};
pub use layout::Layout;

pub use pinbin_archive::{ArchiveUnpacker, TarCommand, TarGzUnpacker, Unpacker};
pub use pinbin_fs::{FileStore, OsFileStore};
pub use pinbin_verify::{Checksum, Checksummer, Sha256Checksummer};

mod config;
mod error;
mod extractor;
mod layout;
