//! Filesystem primitives for managed install directories.
//!
//! [`FileStore`] is the seam between install logic and the disk. The
//! production implementation, [`OsFileStore`], maps each call onto `std::fs`;
//! tests substitute their own store to observe or fail individual calls.
//!
//! Writes are plain overwrites. Nothing here renames into place, so a crash
//! mid-write can leave a truncated file behind and callers must treat file
//! content as untrusted on the next read.

pub use error::{Error, Result};
pub use store::{FileStore, OsFileStore};

mod error;
mod store;
