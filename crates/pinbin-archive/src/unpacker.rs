use std::path::Path;

use crate::{Result, TarCommand, TarGzUnpacker};

/// Unpacks an archive file into a destination directory.
pub trait ArchiveUnpacker {
    fn unpack(&self, archive: &Path, destination: &Path) -> Result<()>;
}

impl<T: ArchiveUnpacker + ?Sized> ArchiveUnpacker for &T {
    fn unpack(&self, archive: &Path, destination: &Path) -> Result<()> {
        (**self).unpack(archive, destination)
    }
}

impl<T: ArchiveUnpacker + ?Sized> ArchiveUnpacker for Box<T> {
    fn unpack(&self, archive: &Path, destination: &Path) -> Result<()> {
        (**self).unpack(archive, destination)
    }
}

/// Unpacker chosen at runtime, usually from configuration.
#[derive(Clone, Debug)]
pub enum Unpacker {
    Command(TarCommand),
    Builtin(TarGzUnpacker),
}

impl Default for Unpacker {
    fn default() -> Self { Self::Command(TarCommand::default()) }
}

impl ArchiveUnpacker for Unpacker {
    fn unpack(&self, archive: &Path, destination: &Path) -> Result<()> {
        match self {
            Self::Command(command) => command.unpack(archive, destination),
            Self::Builtin(builtin) => builtin.unpack(archive, destination),
        }
    }
}

impl From<TarCommand> for Unpacker {
    fn from(command: TarCommand) -> Self { Self::Command(command) }
}

impl From<TarGzUnpacker> for Unpacker {
    fn from(builtin: TarGzUnpacker) -> Self { Self::Builtin(builtin) }
}
