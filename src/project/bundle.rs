// src/project/bundle.rs

//! Location and layout convention of the plugin project.

use std::path::{Path, PathBuf};

use crate::config::BundleSection;

/// The plugin's Cargo project.
///
/// The plugin is launched from the bundle's *parent* directory, which is the
/// host project the bundle lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    directory: PathBuf,
    binary: String,
}

impl Bundle {
    pub fn new(directory: impl Into<PathBuf>, binary: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            binary: binary.into(),
        }
    }

    /// Bundle described by `[bundle]`, relative to `root`.
    pub fn from_config(section: &BundleSection, root: &Path) -> Self {
        Self::new(root.join(&section.directory), section.binary.clone())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn binary_name(&self) -> &str {
        &self.binary
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join("Cargo.toml")
    }

    /// Where the bundle's executable is expected inside a build's bin dir.
    pub fn executable_path(&self, bin_dir: &Path) -> PathBuf {
        bin_dir.join(format!("{}{}", self.binary, std::env::consts::EXE_SUFFIX))
    }

    /// Working directory for the plugin process.
    pub fn launch_directory(&self) -> &Path {
        match self.directory.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => &self.directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_follows_convention() {
        let bundle = Bundle::new("/work/app/_highway", "_highway");

        assert_eq!(bundle.manifest_path(), Path::new("/work/app/_highway/Cargo.toml"));
        assert_eq!(bundle.launch_directory(), Path::new("/work/app"));
        assert_eq!(
            bundle.executable_path(Path::new("/work/app/_highway/target/debug")),
            PathBuf::from(format!(
                "/work/app/_highway/target/debug/_highway{}",
                std::env::consts::EXE_SUFFIX
            ))
        );
    }

    #[test]
    fn from_config_joins_root() {
        let section = BundleSection {
            directory: PathBuf::from("tools/plugin"),
            binary: "plugin".to_string(),
        };
        let bundle = Bundle::from_config(&section, Path::new("/repo"));

        assert_eq!(bundle.directory(), Path::new("/repo/tools/plugin"));
        assert_eq!(bundle.launch_directory(), Path::new("/repo/tools"));
        assert_eq!(bundle.binary_name(), "plugin");
    }

    #[test]
    fn bare_directory_launches_in_itself() {
        let bundle = Bundle::new("_highway", "_highway");
        assert_eq!(bundle.launch_directory(), Path::new("_highway"));
    }
}
