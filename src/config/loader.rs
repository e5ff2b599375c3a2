// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// On-disk syntax of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` is TOML; everything else (`.yml`, `.yaml`, no extension) is
    /// read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }

    pub fn parse(self, contents: &str) -> Result<RawConfigFile> {
        let raw: RawConfigFile = match self {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
        };
        Ok(raw)
    }
}

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs deserialization; it does **not** validate watch
/// targets or task references. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    // An empty YAML document deserializes to unit, not to a map.
    if contents.trim().is_empty() {
        return Ok(RawConfigFile::default());
    }

    ConfigFormat::from_path(path).parse(&contents)
}

/// Load a configuration file from path and validate it.
///
/// This is the entry point used by the binary. Variable pre-resolution is
/// not done here; it happens when the config is turned into a
/// [`TaskGraph`](crate::graph::TaskGraph).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Config file used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("build.yml")
}
