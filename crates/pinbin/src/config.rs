use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{Error, Layout, Result};

/// SHA-256 of the currently pinned `apollo.tar.gz`.
pub const PINNED_SHA256: &str = "13febaa462e56679099d81502d530e16c3ddf1c6c2db06abe3822c0ef79fb9d2";

/// Which [`Unpacker`](pinbin_archive::Unpacker) the extractor should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnpackerKind {
    /// External `tar` executable.
    #[default]
    Tar,
    /// In-process gzip + tar.
    Builtin,
}

/// Extractor configuration.
///
/// Sources, later ones overriding earlier ones:
///
/// 1. built-in defaults (the pinned checksum and the `apollo` layout)
/// 2. a TOML file, when loaded with [`Config::load`]
/// 3. `PINBIN_*` environment variables; nested keys use `__`, e.g.
///    `PINBIN_LAYOUT__INSTALL_DIR`
///
/// ```toml
/// expected_sha256 = "13febaa4..."
/// unpacker = "builtin"
///
/// [layout]
/// install_dir = "apollo"
/// archive = "apollo.tar.gz"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub expected_sha256: String,
    pub unpacker:        UnpackerKind,
    pub tar_program:     String,
    pub layout:          Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expected_sha256: PINNED_SHA256.to_string(),
            unpacker:        UnpackerKind::default(),
            tar_program:     "tar".to_string(),
            layout:          Layout::default(),
        }
    }
}

impl Config {
    pub const ENV_PREFIX: &'static str = "PINBIN_";

    /// Defaults merged with `PINBIN_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Self::env())
    }

    pub fn from_env() -> Result<Self> { Self::extract(Self::figment()) }

    /// Defaults, then the TOML file at `path` (if it exists), then the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Self::env());
        Self::extract(figment)
    }

    /// Defaults overridden by a TOML document. The environment is not consulted.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(toml));
        Self::extract(figment)
    }

    pub fn validate(&self) -> Result<()> {
        if self.expected_sha256.trim().is_empty() {
            return Err(Error::InvalidConfig("expected_sha256 must not be empty".into()));
        }
        if self.tar_program.trim().is_empty() {
            return Err(Error::InvalidConfig("tar_program must not be empty".into()));
        }
        self.layout.validate()
    }

    fn env() -> Env { Env::prefixed(Self::ENV_PREFIX).split("__") }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}
