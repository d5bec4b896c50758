// src/config/loader.rs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if given, otherwise the default config if it exists.
///
/// An explicitly named file must exist; a missing default file just means
/// built-in defaults.
pub fn load_optional(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_and_validate(path),
        None => {
            let path = default_config_path();
            match load_and_validate(&path) {
                Err(crate::errors::PipevimError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %path.display(), "no config file; using defaults");
                    Ok(ConfigFile::default())
                }
                other => other,
            }
        }
    }
}

/// `Pipevim.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Pipevim.toml")
}
