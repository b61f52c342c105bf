use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::{Checksum, Result, Sha256Hasher, VerificationError, VerifiedReader};

/// Computes the checksum of a file on disk.
pub trait Checksummer {
    fn checksum(&self, path: &Path) -> Result<Checksum>;
}

impl<T: Checksummer + ?Sized> Checksummer for &T {
    fn checksum(&self, path: &Path) -> Result<Checksum> { (**self).checksum(path) }
}

/// SHA-256 over the raw file bytes, hex encoded. Same output as `shasum -a 256`
/// without the trailing file name.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Checksummer;

impl Checksummer for Sha256Checksummer {
    fn checksum(&self, path: &Path) -> Result<Checksum> {
        let io_err = |source: io::Error| VerificationError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let mut reader = VerifiedReader::new(BufReader::new(file), Sha256Hasher::new());
        io::copy(&mut reader, &mut io::sink()).map_err(io_err)?;

        Ok(reader.into_checksum())
    }
}
