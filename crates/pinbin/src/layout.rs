use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Names of the managed paths, all relative to a scripts root.
///
/// ```text
/// <root>/<archive>
/// <root>/<install_dir>/<marker>
/// <root>/<install_dir>/<binary_dir>/<binary>
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub install_dir: String,
    pub archive:     String,
    pub binary_dir:  String,
    pub binary:      String,
    pub marker:      String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            install_dir: "apollo".into(),
            archive:     "apollo.tar.gz".into(),
            binary_dir:  "bin".into(),
            binary:      "run".into(),
            marker:      ".shasum".into(),
        }
    }
}

impl Layout {
    pub fn install_path(&self, root: &Path) -> PathBuf { root.join(&self.install_dir) }

    pub fn archive_path(&self, root: &Path) -> PathBuf { root.join(&self.archive) }

    pub fn binary_dir_path(&self, root: &Path) -> PathBuf {
        self.install_path(root).join(&self.binary_dir)
    }

    pub fn binary_path(&self, root: &Path) -> PathBuf {
        self.binary_dir_path(root).join(&self.binary)
    }

    pub fn marker_path(&self, root: &Path) -> PathBuf {
        self.install_path(root).join(&self.marker)
    }

    /// Every name must be exactly one plain path component.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("install_dir", &self.install_dir),
            ("archive", &self.archive),
            ("binary_dir", &self.binary_dir),
            ("binary", &self.binary),
            ("marker", &self.marker),
        ];

        for (field, name) in names {
            if !is_plain_name(name) {
                return Err(Error::InvalidConfig(format!(
                    "layout.{field} must be a single path component, got {name:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
