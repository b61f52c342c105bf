mod common;

use std::path::Path;

use common::{Item, apollo_items, write_tar_gz};
use pinbin_archive::{ArchiveUnpacker, Error, TarCommand, TarGzUnpacker, Unpacker};
use tempfile::tempdir;

fn assert_apollo_layout(root: &Path) {
    assert!(root.join("apollo/bin").is_dir());
    assert_eq!(
        std::fs::read_to_string(root.join("apollo/bin/run")).unwrap(),
        "#!/bin/sh\necho apollo\n"
    );
    assert!(root.join("apollo/package.json").is_file());
}

#[test]
fn builtin_unpacks_layout() {
    let dir = tempdir().unwrap();
    let archive = write_tar_gz(&dir.path().join("apollo.tar.gz"), &apollo_items());

    TarGzUnpacker::new().unpack(&archive, dir.path()).unwrap();

    assert_apollo_layout(dir.path());
}

#[cfg(unix)]
#[test]
fn builtin_preserves_executable_bit() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let archive = write_tar_gz(&dir.path().join("apollo.tar.gz"), &apollo_items());

    TarGzUnpacker::new().unpack(&archive, dir.path()).unwrap();

    let mode = std::fs::metadata(dir.path().join("apollo/bin/run"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn builtin_accepts_root_entry() {
    let dir = tempdir().unwrap();
    let mut items = vec![Item::Dir("./")];
    items.extend(apollo_items());
    let archive = write_tar_gz(&dir.path().join("apollo.tar.gz"), &items);

    TarGzUnpacker::new().unpack(&archive, dir.path()).unwrap();

    assert_apollo_layout(dir.path());
}

#[test]
fn builtin_creates_missing_parents() {
    let dir = tempdir().unwrap();
    let archive = write_tar_gz(
        &dir.path().join("apollo.tar.gz"),
        &[Item::File("apollo/bin/run", b"x", 0o755)],
    );

    TarGzUnpacker::new().unpack(&archive, dir.path()).unwrap();

    assert!(dir.path().join("apollo/bin/run").is_file());
}

#[test]
fn builtin_rejects_parent_escape() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("scripts");
    std::fs::create_dir(&dest).unwrap();
    let archive = write_tar_gz(
        &dir.path().join("evil.tar.gz"),
        &[Item::RawFile(b"../escaped", b"gotcha")],
    );

    let result = TarGzUnpacker::new().unpack(&archive, &dest);

    assert!(matches!(result, Err(Error::PathEscape { .. })));
    assert!(!dir.path().join("escaped").exists());
}

#[cfg(unix)]
#[test]
fn builtin_unpacks_inner_symlink() {
    let dir = tempdir().unwrap();
    let mut items = apollo_items();
    items.push(Item::Symlink("apollo/bin/apollo", "run"));
    let archive = write_tar_gz(&dir.path().join("apollo.tar.gz"), &items);

    TarGzUnpacker::new().unpack(&archive, dir.path()).unwrap();

    let link = dir.path().join("apollo/bin/apollo");
    assert!(link.is_symlink());
    assert_eq!(
        std::fs::read_to_string(link).unwrap(),
        "#!/bin/sh\necho apollo\n"
    );
}

#[cfg(unix)]
#[test]
fn builtin_rejects_escaping_symlink() {
    let dir = tempdir().unwrap();
    let archive = write_tar_gz(
        &dir.path().join("apollo.tar.gz"),
        &[Item::Symlink("apollo/bin/run", "../../../../etc/passwd")],
    );

    let result = TarGzUnpacker::new().unpack(&archive, dir.path());

    assert!(matches!(result, Err(Error::SymlinkEscape { .. })));
}

#[cfg(unix)]
#[test]
fn builtin_rejects_symlink_chain_out_of_destination() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("scripts");
    std::fs::create_dir(&dest).unwrap();
    let archive = write_tar_gz(
        &dir.path().join("apollo.tar.gz"),
        &[
            Item::Symlink("a", "."),
            Item::Symlink("a/b", ".."),
            Item::File("a/b/escaped", b"gotcha", 0o644),
        ],
    );

    let result = TarGzUnpacker::new().unpack(&archive, &dest);

    assert!(matches!(result, Err(Error::SymlinkEscape { .. })), "{result:?}");
    assert!(!dir.path().join("escaped").exists());
    assert!(!dest.join("b").exists());
}

#[cfg(unix)]
#[test]
fn builtin_refuses_to_write_through_existing_symlink() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("scripts");
    let outside = dir.path().join("outside");
    std::fs::create_dir(&dest).unwrap();
    std::fs::create_dir(&outside).unwrap();
    std::os::unix::fs::symlink(&outside, dest.join("apollo")).unwrap();
    let archive = write_tar_gz(
        &dir.path().join("apollo.tar.gz"),
        &[Item::File("apollo/bin/run", b"#!/bin/sh\n", 0o755)],
    );

    let result = TarGzUnpacker::new().unpack(&archive, &dest);

    assert!(matches!(result, Err(Error::PathEscape { .. })), "{result:?}");
    assert!(!outside.join("bin").exists());
}

#[cfg(unix)]
#[test]
fn builtin_unpacks_hard_link() {
    use std::os::unix::fs::MetadataExt;

    let dir = tempdir().unwrap();
    let mut items = apollo_items();
    items.push(Item::HardLink("apollo/bin/apollo", "apollo/bin/run"));
    let archive = write_tar_gz(&dir.path().join("apollo.tar.gz"), &items);

    TarGzUnpacker::new().unpack(&archive, dir.path()).unwrap();

    let run = std::fs::metadata(dir.path().join("apollo/bin/run")).unwrap();
    let link = std::fs::metadata(dir.path().join("apollo/bin/apollo")).unwrap();
    assert_eq!(run.ino(), link.ino());
}

#[test]
fn builtin_rejects_hard_link_out_of_root() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("scripts");
    std::fs::create_dir(&dest).unwrap();
    std::fs::write(dir.path().join("secret"), "x").unwrap();
    let archive = write_tar_gz(
        &dir.path().join("apollo.tar.gz"),
        &[Item::HardLink("apollo/secret", "../secret")],
    );

    let result = TarGzUnpacker::new().unpack(&archive, &dest);

    assert!(matches!(result, Err(Error::PathEscape { .. })), "{result:?}");
    assert!(!dest.join("apollo/secret").exists());
}

#[cfg(unix)]
#[test]
fn tar_command_unpacks_layout() {
    let dir = tempdir().unwrap();
    let archive = write_tar_gz(&dir.path().join("apollo.tar.gz"), &apollo_items());

    TarCommand::default().unpack(&archive, dir.path()).unwrap();

    assert_apollo_layout(dir.path());
}

#[cfg(unix)]
#[test]
fn tar_command_reports_exit_status() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("apollo.tar.gz");
    std::fs::write(&archive, b"not an archive").unwrap();

    let result = TarCommand::default().unpack(&archive, dir.path());

    match result {
        Err(Error::ExitStatus { program, status, .. }) => {
            assert_eq!(program, "tar");
            assert!(!status.success());
        }
        other => panic!("expected ExitStatus, got {other:?}"),
    }
}

#[test]
fn selector_dispatches_to_builtin() {
    let dir = tempdir().unwrap();
    let archive = write_tar_gz(&dir.path().join("apollo.tar.gz"), &apollo_items());

    let unpacker = Unpacker::from(TarGzUnpacker::new());
    unpacker.unpack(&archive, dir.path()).unwrap();

    assert_apollo_layout(dir.path());
}
