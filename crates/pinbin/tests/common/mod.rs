#![allow(dead_code)]

use std::cell::Cell;
use std::fs::File;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use pinbin::{ArchiveUnpacker, Checksummer, Sha256Checksummer};
use tar::{Builder, EntryType, Header};

pub const RUN_SCRIPT: &[u8] = b"#!/bin/sh\necho apollo\n";

/// Write `<root>/apollo.tar.gz` with the given files and return its SHA-256.
pub fn write_archive(root: &Path, files: &[(&str, &[u8])]) -> String {
    let path = root.join("apollo.tar.gz");
    let mut builder = Builder::new(GzEncoder::new(File::create(&path).unwrap(), Compression::default()));

    for (name, content) in files {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_path(name).unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append(&header, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();

    Sha256Checksummer.checksum(&path).unwrap().into_string()
}

pub fn write_apollo_archive(root: &Path) -> String {
    write_archive(
        root,
        &[
            ("apollo/bin/run", RUN_SCRIPT),
            ("apollo/lib/index.js", b"module.exports = {}"),
        ],
    )
}

/// Wraps an unpacker and counts calls.
pub struct Counting<U> {
    pub inner: U,
    pub calls: Cell<usize>,
}

impl<U> Counting<U> {
    pub fn new(inner: U) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }
}

impl<U: ArchiveUnpacker> ArchiveUnpacker for Counting<U> {
    fn unpack(&self, archive: &Path, destination: &Path) -> pinbin_archive::Result<()> {
        self.calls.set(self.calls.get() + 1);
        self.inner.unpack(archive, destination)
    }
}
