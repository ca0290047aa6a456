// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{HighwayError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = HighwayError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.bundle, raw.build, raw.plugin))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_bundle(cfg)?;
    validate_build(cfg)?;
    validate_plugin(cfg)?;
    Ok(())
}

fn validate_bundle(cfg: &RawConfigFile) -> Result<()> {
    if cfg.bundle.directory.as_os_str().is_empty() {
        return Err(config_error("[bundle].directory must not be empty"));
    }

    let binary = cfg.bundle.binary.trim();
    if binary.is_empty() {
        return Err(config_error("[bundle].binary must not be empty"));
    }
    if binary.contains(['/', '\\']) {
        return Err(HighwayError::ConfigError(format!(
            "[bundle].binary must be a file name, not a path (got '{}')",
            cfg.bundle.binary
        )));
    }
    Ok(())
}

fn validate_build(cfg: &RawConfigFile) -> Result<()> {
    if cfg.build.cargo.trim().is_empty() {
        return Err(config_error("[build].cargo must not be empty"));
    }
    Ok(())
}

fn validate_plugin(cfg: &RawConfigFile) -> Result<()> {
    if cfg.plugin.list_argument.trim().is_empty() {
        return Err(config_error("[plugin].list_argument must not be empty"));
    }
    if let Some(bad) = cfg
        .plugin
        .pass_env
        .iter()
        .find(|key| key.is_empty() || key.contains('='))
    {
        return Err(HighwayError::ConfigError(format!(
            "[plugin].pass_env contains an invalid variable name '{bad}'"
        )));
    }
    Ok(())
}

fn config_error(msg: &str) -> HighwayError {
    HighwayError::ConfigError(msg.to_string())
}
