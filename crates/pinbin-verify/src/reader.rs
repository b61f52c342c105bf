use std::io::{self, Read};

use crate::{Checksum, Hasher, Result};

/// Streaming reader that hashes data as it passes through.
pub struct VerifiedReader<R, H> {
    reader: R,
    hasher: H,
}

impl<R, H> VerifiedReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self { Self { reader, hasher } }
}

impl<R: Read, H: Hasher> Read for VerifiedReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
        }
        Ok(n)
    }
}

impl<R: Read, H: Hasher> VerifiedReader<R, H> {
    /// Digest of everything read so far.
    pub fn into_checksum(self) -> Checksum { Checksum::from_digest(&self.hasher.finalize()) }

    /// Finalize and check the digest against `expected` using the match rule.
    pub fn finish(self, expected: &str) -> Result<Checksum> {
        let actual = self.into_checksum();
        actual.verify(expected)?;
        Ok(actual)
    }
}
