#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};

pub enum Item<'a> {
    Dir(&'a str),
    File(&'a str, &'a [u8], u32),
    Symlink(&'a str, &'a str),
    HardLink(&'a str, &'a str),
    /// Regular file whose name is written raw, bypassing the builder's own path checks.
    RawFile(&'a [u8], &'a [u8]),
}

pub fn write_tar_gz(path: &Path, items: &[Item<'_>]) -> PathBuf {
    let file = File::create(path).unwrap();
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));

    for item in items {
        let mut header = Header::new_gnu();
        match item {
            Item::Dir(name) => {
                header.set_entry_type(EntryType::Directory);
                header.set_path(name).unwrap();
                header.set_size(0);
                header.set_mode(0o755);
                header.set_cksum();
                builder.append(&header, std::io::empty()).unwrap();
            }
            Item::File(name, content, mode) => {
                header.set_entry_type(EntryType::Regular);
                header.set_path(name).unwrap();
                header.set_size(content.len() as u64);
                header.set_mode(*mode);
                header.set_cksum();
                builder.append(&header, *content).unwrap();
            }
            Item::Symlink(name, target) => {
                header.set_entry_type(EntryType::Symlink);
                header.set_size(0);
                header.set_mode(0o777);
                builder.append_link(&mut header, name, target).unwrap();
            }
            Item::HardLink(name, source) => {
                header.set_entry_type(EntryType::Link);
                header.set_size(0);
                header.set_mode(0o644);
                builder.append_link(&mut header, name, source).unwrap();
            }
            Item::RawFile(name, content) => {
                header.set_entry_type(EntryType::Regular);
                header.as_old_mut().name[..name.len()].copy_from_slice(name);
                header.set_size(content.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();
                builder.append(&header, *content).unwrap();
            }
        }
    }

    builder.into_inner().unwrap().finish().unwrap();
    path.to_path_buf()
}

pub fn apollo_items() -> Vec<Item<'static>> {
    vec![
        Item::Dir("apollo/"),
        Item::Dir("apollo/bin/"),
        Item::File("apollo/bin/run", b"#!/bin/sh\necho apollo\n", 0o755),
        Item::File("apollo/package.json", b"{\"name\":\"apollo\"}", 0o644),
    ]
}
