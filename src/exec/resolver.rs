// src/exec/resolver.rs

//! Executable lookup.
//!
//! Tasks resolve their executable up front so a missing or non-executable
//! program is reported as [`HighwayError::ExecutableNotFound`] before any
//! process is launched.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{HighwayError, Result};

/// Locate an executable by bare name or validate an explicit path.
pub trait ExecutableResolver: Send + Sync {
    /// Resolve `program` to an absolute path of an existing executable.
    ///
    /// Relative paths containing a separator are resolved against `cwd`;
    /// bare names are searched on the resolver's search path.
    fn resolve(&self, program: &Path, cwd: &Path) -> Result<PathBuf>;

    /// Whether a command with this name can be found.
    fn contains(&self, program: &str) -> bool {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.resolve(Path::new(program), &cwd).is_ok()
    }
}

/// Resolver backed by the `which` crate.
///
/// Searches `PATH` of the current process unless an explicit search path
/// was configured.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver {
    search_path: Option<OsString>,
}

impl SystemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `paths` (in `PATH` syntax) instead of the process' `PATH`.
    pub fn with_search_path(paths: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(paths.into()),
        }
    }
}

impl ExecutableResolver for SystemResolver {
    fn resolve(&self, program: &Path, cwd: &Path) -> Result<PathBuf> {
        let paths = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"));

        let resolved = which::which_in(program, paths, cwd).map_err(|err| {
            HighwayError::ExecutableNotFound {
                name: program.display().to_string(),
                reason: err.to_string(),
            }
        })?;

        debug!(
            program = %program.display(),
            resolved = %resolved.display(),
            "resolved executable"
        );
        Ok(resolved)
    }
}
