//! Archive unpacking behind a swappable unpacker seam.
//!
//! # Architecture
//!
//! - `unpacker.rs` - the [`ArchiveUnpacker`] contract and the [`Unpacker`] selector
//! - `command.rs` - [`TarCommand`], delegating to an external `tar` executable
//! - `builtin.rs` - [`TarGzUnpacker`], in-process gzip + tar
//! - `sanitize.rs` - entry path and link checks for the in-process unpacker, lexical and on disk
//!
//! Both unpackers write the archive's own layout below the destination
//! directory. Neither checks that the result has any particular shape; that
//! is left to the caller.

pub use builtin::TarGzUnpacker;
pub use command::TarCommand;
pub use error::{Error, Result};
pub use sanitize::{
    resolve_parent, sanitize_entry_path, sanitize_symlink_in, sanitize_symlink_target,
};
pub use unpacker::{ArchiveUnpacker, Unpacker};

mod builtin;
mod command;
mod error;
mod sanitize;
mod unpacker;
