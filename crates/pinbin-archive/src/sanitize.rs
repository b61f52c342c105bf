use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Resolve an archive entry path to its location under `destination`.
///
/// Absolute entries and entries whose `..` components climb above the
/// archive root are rejected (zip-slip).
pub fn sanitize_entry_path(entry: &Path, destination: &Path) -> Result<PathBuf> {
    let relative = normalize_relative(entry).ok_or_else(|| Error::PathEscape {
        entry: entry.to_path_buf(),
    })?;
    Ok(destination.join(relative))
}

/// Check that a symlink stored at `entry` with link text `target` stays
/// inside the archive root.
pub fn sanitize_symlink_target(target: &Path, entry: &Path) -> Result<()> {
    let escape = || Error::SymlinkEscape {
        link:   entry.to_path_buf(),
        target: target.to_path_buf(),
    };

    let link = normalize_relative(entry).ok_or_else(escape)?;
    let base = link.parent().unwrap_or(Path::new(""));
    normalize_relative(&base.join(target)).ok_or_else(escape)?;
    Ok(())
}

/// Resolve the directory an entry will be written into against what is
/// already on disk.
///
/// `root` must be the canonical destination. Returns the entry's parent
/// relative to `root` after following symlinks left by earlier entries, or
/// [`Error::PathEscape`] when one of them redirects the entry outside.
/// Trailing components that do not exist yet are appended as-is.
pub fn resolve_parent(entry: &Path, target: &Path, root: &Path) -> Result<PathBuf> {
    let escape = || Error::PathEscape {
        entry: entry.to_path_buf(),
    };

    let mut missing = Vec::new();
    let mut ancestor = target.parent().ok_or_else(escape)?;
    let real = loop {
        match fs::canonicalize(ancestor) {
            Ok(real) => break real,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                missing.push(ancestor.file_name().ok_or_else(escape)?);
                ancestor = ancestor.parent().ok_or_else(escape)?;
            }
            Err(e) => {
                return Err(Error::Write {
                    path:   ancestor.to_path_buf(),
                    source: e,
                });
            }
        }
    };

    let mut relative = real.strip_prefix(root).map_err(|_| escape())?.to_path_buf();
    relative.extend(missing.into_iter().rev());
    Ok(relative)
}

/// Check a symlink's link text against the real location of its parent.
///
/// `parent` is the value returned by [`resolve_parent`]. `..` is only
/// accepted as a leading component and may not climb above the root; a `..`
/// after a named component could step back out of an earlier symlink.
pub fn sanitize_symlink_in(target: &Path, entry: &Path, parent: &Path) -> Result<()> {
    let escape = || Error::SymlinkEscape {
        link:   entry.to_path_buf(),
        target: target.to_path_buf(),
    };

    let mut depth = parent.components().count();
    let mut descended = false;
    for component in target.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(_) => descended = true,
            Component::ParentDir if !descended && depth > 0 => depth -= 1,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(escape());
            }
        }
    }
    Ok(())
}

/// Lexically resolve `.` and `..` in a relative path.
///
/// Returns `None` for absolute paths and for paths that climb above their
/// starting point.
fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => {
                result.push(part);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                result.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(result)
}
