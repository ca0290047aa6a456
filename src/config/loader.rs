// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{HighwayError, Result};
use crate::fs::FileSystem;

/// Load a configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the checked model.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(fs, &path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load the config, falling back to defaults when `path` is `None` and the
/// default file does not exist. An explicitly given path must exist.
pub fn load_or_default(fs: &dyn FileSystem, path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => {
            if !fs.is_file(path) {
                return Err(HighwayError::ConfigError(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            load_and_validate(fs, path)
        }
        None => {
            let default_path = default_config_path();
            if fs.is_file(&default_path) {
                load_and_validate(fs, &default_path)
            } else {
                debug!(path = %default_path.display(), "no config file; using defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}

/// `Highway.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Highway.toml")
}
