// src/config/mod.rs

//! Configuration loading and validation for highway.
//!
//! - The TOML-backed data model lives in `model.rs`.
//! - `loader.rs` reads a config file through the [`crate::fs::FileSystem`] port.
//! - `validate.rs` turns the raw model into a checked [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{BuildSection, BundleSection, ConfigFile, PluginSection, RawConfigFile};
