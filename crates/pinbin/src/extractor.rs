use std::path::{Path, PathBuf};

use pinbin_archive::{ArchiveUnpacker, TarCommand, TarGzUnpacker, Unpacker};
use pinbin_fs::{FileStore, OsFileStore};
use pinbin_verify::{Checksummer, Sha256Checksummer, matches};
use tracing::{debug, info, warn};

use crate::{Config, Error, Layout, Result, UnpackerKind};

/// On-disk state of an install directory, as seen by [`Extractor::inspect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallState {
    /// The install directory does not exist.
    NoInstall,
    /// The marker is missing, unreadable as text, or does not match.
    MarkerInvalid,
    /// The marker matches but the binary is gone.
    BinaryMissing,
    /// Marker matches and the binary is present.
    Ready,
}

/// Production wiring: configurable unpacker, SHA-256, local filesystem.
pub type SystemExtractor = Extractor<Unpacker, Sha256Checksummer, OsFileStore>;

/// Ensures the vendored binary under a scripts root is extracted and trusted.
///
/// Generic over its collaborators so the decision logic can be driven by
/// fakes. The expected checksum is fixed at construction and used by
/// [`ensure_installed`](Self::ensure_installed); the `_with` variant takes a
/// one-off override.
#[derive(Clone, Debug)]
pub struct Extractor<U, C, S> {
    layout:      Layout,
    expected:    String,
    unpacker:    U,
    checksummer: C,
    store:       S,
}

impl SystemExtractor {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let unpacker = match config.unpacker {
            UnpackerKind::Tar => Unpacker::Command(TarCommand::new(config.tar_program.clone())),
            UnpackerKind::Builtin => Unpacker::Builtin(TarGzUnpacker::new()),
        };

        Ok(Extractor::new(
            config.expected_sha256.clone(),
            unpacker,
            Sha256Checksummer,
            OsFileStore,
        )
        .with_layout(config.layout.clone()))
    }
}

impl<U, C, S> Extractor<U, C, S>
where
    U: ArchiveUnpacker,
    C: Checksummer,
    S: FileStore,
{
    pub fn new(expected: impl Into<String>, unpacker: U, checksummer: C, store: S) -> Self {
        Self {
            layout: Layout::default(),
            expected: expected.into(),
            unpacker,
            checksummer,
            store,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &Layout { &self.layout }

    pub fn expected_checksum(&self) -> &str { &self.expected }

    /// Return the binary directory under `root`, extracting it first if needed.
    pub fn ensure_installed(&self, root: &Path) -> Result<PathBuf> {
        self.ensure_installed_with(root, &self.expected)
    }

    /// Like [`ensure_installed`](Self::ensure_installed) with an explicit
    /// expected checksum. The override is also what gets written to the marker.
    ///
    /// An empty `expected` is rejected before the install directory is looked at.
    pub fn ensure_installed_with(&self, root: &Path, expected: &str) -> Result<PathBuf> {
        require_checksum(expected)?;
        let install_dir = self.layout.install_path(root);

        match self.inspect(root, expected)? {
            InstallState::Ready => {
                debug!(path = %install_dir.display(), "binary already extracted");
                return Ok(self.layout.binary_dir_path(root));
            }
            InstallState::NoInstall => {
                info!(path = %install_dir.display(), "install directory missing, extracting from archive");
            }
            InstallState::MarkerInvalid => {
                info!(
                    path = %install_dir.display(),
                    "marker does not match expected checksum, deleting and re-extracting"
                );
                self.store.remove_dir_all(&install_dir)?;
            }
            InstallState::BinaryMissing => {
                warn!(
                    path = %self.layout.binary_path(root).display(),
                    "marker is valid but the binary is missing, deleting and re-extracting"
                );
                self.store.remove_dir_all(&install_dir)?;
            }
        }

        self.extract_from_archive(root, expected)
    }

    /// Classify the install directory without touching it.
    pub fn inspect(&self, root: &Path, expected: &str) -> Result<InstallState> {
        if !self.store.exists(&self.layout.install_path(root)) {
            return Ok(InstallState::NoInstall);
        }
        if !self.marker_matches(root, expected)? {
            return Ok(InstallState::MarkerInvalid);
        }
        if !self.store.is_file(&self.layout.binary_path(root)) {
            return Ok(InstallState::BinaryMissing);
        }
        Ok(InstallState::Ready)
    }

    /// Whether the marker content satisfies the checksum match rule.
    ///
    /// A missing marker or one that is not UTF-8 counts as a mismatch; any
    /// other read failure is an error.
    pub fn marker_matches(&self, root: &Path, expected: &str) -> Result<bool> {
        let marker = self.layout.marker_path(root);
        match self.store.read_to_string(&marker) {
            Ok(content) => Ok(matches(&content, expected)),
            Err(e) if e.is_not_found() || e.is_invalid_data() => {
                debug!(path = %marker.display(), error = %e, "marker unreadable");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verify the archive, unpack it into `root` and record `expected` in the marker.
    ///
    /// Nothing is unpacked when the archive checksum does not match. Does not
    /// clear an existing install directory first.
    pub fn extract_from_archive(&self, root: &Path, expected: &str) -> Result<PathBuf> {
        require_checksum(expected)?;
        let archive = self.layout.archive_path(root);
        if !self.store.exists(&archive) {
            return Err(Error::ArchiveMissing { path: archive });
        }

        let actual = self.checksummer.checksum(&archive).map_err(|e| {
            if e.is_not_found() {
                Error::ArchiveMissing {
                    path: archive.clone(),
                }
            } else {
                Error::ChecksumUnavailable {
                    path:   archive.clone(),
                    source: e,
                }
            }
        })?;
        debug!(path = %archive.display(), %actual, "computed archive checksum");

        if !actual.matches(expected) {
            return Err(Error::ArchiveIntegrityMismatch {
                expected: expected.to_string(),
                actual:   actual.into_string(),
            });
        }

        info!(path = %archive.display(), "extracting binary from archive, this may take a moment");
        self.unpacker
            .unpack(&archive, root)
            .map_err(Error::UnpackFailure)?;

        let binary_dir = self.layout.binary_dir_path(root);
        if !self.store.is_dir(&binary_dir) {
            return Err(Error::StructuralMismatch { path: binary_dir });
        }
        let binary = self.layout.binary_path(root);
        if !self.store.is_file(&binary) {
            return Err(Error::StructuralMismatch { path: binary });
        }

        self.store
            .write(&self.layout.marker_path(root), expected.as_bytes())?;
        info!(path = %binary.display(), "binary extracted");

        Ok(binary_dir)
    }
}

fn require_checksum(expected: &str) -> Result<()> {
    if expected.trim().is_empty() {
        return Err(Error::InvalidConfig("expected checksum must not be empty".into()));
    }
    Ok(())
}
