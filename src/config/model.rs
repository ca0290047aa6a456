// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from `Highway.toml`.
///
/// ```toml
/// [bundle]
/// directory = "_highway"
/// binary = "_highway"
///
/// [build]
/// cargo = "cargo"
/// release = false
///
/// [plugin]
/// list_argument = "listPublicHighwaysAsJSON"
/// pass_env = ["PATH", "HOME"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub bundle: BundleSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub plugin: PluginSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub bundle: BundleSection,
    pub build: BuildSection,
    pub plugin: PluginSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        bundle: BundleSection,
        build: BuildSection,
        plugin: PluginSection,
    ) -> Self {
        Self {
            bundle,
            build,
            plugin,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            BundleSection::default(),
            BuildSection::default(),
            PluginSection::default(),
        )
    }
}

/// `[bundle]` section: where the plugin project lives and what it builds.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleSection {
    /// Bundle directory, relative to the directory holding the config file.
    #[serde(default = "default_bundle_directory")]
    pub directory: PathBuf,

    /// Name of the executable the bundle produces (no extension).
    #[serde(default = "default_binary")]
    pub binary: String,
}

fn default_bundle_directory() -> PathBuf {
    PathBuf::from("_highway")
}

fn default_binary() -> String {
    "_highway".to_string()
}

impl Default for BundleSection {
    fn default() -> Self {
        Self {
            directory: default_bundle_directory(),
            binary: default_binary(),
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Cargo program, looked up on `PATH` if it is a bare name.
    #[serde(default = "default_cargo")]
    pub cargo: String,

    #[serde(default)]
    pub release: bool,

    /// Target directory; relative paths are taken from the bundle directory.
    /// Defaults to `<bundle>/target`.
    #[serde(default)]
    pub target_dir: Option<PathBuf>,
}

fn default_cargo() -> String {
    "cargo".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            cargo: default_cargo(),
            release: false,
            target_dir: None,
        }
    }
}

/// `[plugin]` section: how the built plugin is launched.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginSection {
    /// Argument that makes the plugin print its operations as JSON.
    #[serde(default = "default_list_argument")]
    pub list_argument: String,

    /// Environment variables forwarded to the plugin process.
    #[serde(default = "default_pass_env")]
    pub pass_env: Vec<String>,
}

fn default_list_argument() -> String {
    "listPublicHighwaysAsJSON".to_string()
}

fn default_pass_env() -> Vec<String> {
    vec!["PATH".to_string(), "HOME".to_string()]
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            list_argument: default_list_argument(),
            pass_env: default_pass_env(),
        }
    }
}
