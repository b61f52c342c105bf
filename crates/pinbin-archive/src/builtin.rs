use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, warn};

use crate::sanitize::{
    resolve_parent, sanitize_entry_path, sanitize_symlink_in, sanitize_symlink_target,
};
use crate::{ArchiveUnpacker, Error, Result};

/// In-process `.tar.gz` unpacker.
///
/// Every entry path must pass [`sanitize_entry_path`] and, once earlier
/// entries are on disk, [`resolve_parent`]. Symlink targets and hard link
/// sources get the same treatment. Writing itself goes through
/// [`tar::Entry::unpack_in`], so directories, regular files, symlinks, hard
/// links and fifos come out the same as with [`crate::TarCommand`]. Device
/// nodes are skipped with a warning.
#[derive(Clone, Copy, Debug)]
pub struct TarGzUnpacker {
    preserve_permissions: bool,
}

impl Default for TarGzUnpacker {
    fn default() -> Self { Self::new() }
}

impl TarGzUnpacker {
    pub fn new() -> Self {
        Self {
            preserve_permissions: true,
        }
    }

    /// Keep setuid, setgid and sticky bits from the archive (Unix only). On
    /// by default. The `rwx` bits are applied either way.
    pub fn preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }
}

impl ArchiveUnpacker for TarGzUnpacker {
    fn unpack(&self, archive: &Path, destination: &Path) -> Result<()> {
        let file = File::open(archive).map_err(|e| Error::Open {
            path:   archive.to_path_buf(),
            source: e,
        })?;
        let corrupted = |source: io::Error| Error::Corrupted {
            path: archive.to_path_buf(),
            source,
        };

        let root = canonical_root(destination)?;
        let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        tar.set_preserve_permissions(self.preserve_permissions);
        let mut count = 0usize;

        for entry in tar.entries().map_err(corrupted)? {
            let mut entry = entry.map_err(corrupted)?;
            let raw_path = entry.path().map_err(corrupted)?.into_owned();
            let target = sanitize_entry_path(&raw_path, &root)?;
            let entry_type = entry.header().entry_type();

            if entry_type.is_block_special() || entry_type.is_character_special() {
                warn!(path = %raw_path.display(), ?entry_type, "skipping device entry");
                continue;
            }

            if target == root {
                continue;
            }
            let parent = resolve_parent(&raw_path, &target, &root)?;

            if entry_type.is_symlink() || entry_type.is_hard_link() {
                let link = entry
                    .link_name()
                    .map_err(corrupted)?
                    .ok_or_else(|| corrupted(io::Error::other("link entry without target")))?
                    .into_owned();
                if entry_type.is_symlink() {
                    sanitize_symlink_target(&link, &raw_path)?;
                    sanitize_symlink_in(&link, &raw_path, &parent)?;
                } else {
                    // Hard link sources are named from the archive root.
                    let source = sanitize_entry_path(&link, &root)?;
                    resolve_parent(&link, &source, &root)?;
                }
            }

            let unpacked = entry.unpack_in(&root).map_err(|e| Error::Write {
                path:   target.clone(),
                source: e,
            })?;
            if unpacked {
                count += 1;
            }
        }

        debug!(archive = %archive.display(), entries = count, "unpacked archive");
        Ok(())
    }
}

fn canonical_root(destination: &Path) -> Result<PathBuf> {
    let write_err = |source: io::Error| Error::Write {
        path: destination.to_path_buf(),
        source,
    };
    fs::create_dir_all(destination).map_err(write_err)?;
    fs::canonicalize(destination).map_err(write_err)
}
