use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::{ArchiveUnpacker, Error, Result};

/// Unpacks `.tar.gz` archives with an external `tar` executable.
///
/// Runs `<program> xzf <archive> -C <destination>` and blocks until it exits.
/// Paths are passed as separate arguments, never through a shell.
#[derive(Clone, Debug)]
pub struct TarCommand {
    program: String,
}

impl Default for TarCommand {
    fn default() -> Self { Self::new("tar") }
}

impl TarCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str { &self.program }

    fn command(&self, archive: &Path, destination: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("xzf").arg(archive).arg("-C").arg(destination);
        command
    }
}

impl ArchiveUnpacker for TarCommand {
    fn unpack(&self, archive: &Path, destination: &Path) -> Result<()> {
        debug!(program = %self.program, archive = %archive.display(), "running tar");

        let output = self
            .command(archive, destination)
            .output()
            .map_err(|e| Error::Spawn {
                program: self.program.clone(),
                source:  e,
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(Error::ExitStatus {
            program: self.program.clone(),
            status:  output.status,
            stderr:  String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
