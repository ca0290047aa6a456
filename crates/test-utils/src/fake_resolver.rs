use std::path::{Path, PathBuf};

use highway::errors::{HighwayError, Result};
use highway::exec::ExecutableResolver;

/// Resolver that accepts everything.
///
/// Paths are returned as given (relative ones joined onto the cwd); bare
/// names resolve into `bin_dir`.
#[derive(Debug, Clone)]
pub struct FakeResolver {
    bin_dir: PathBuf,
    missing: Vec<String>,
}

impl FakeResolver {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            missing: Vec::new(),
        }
    }

    /// Make `program` unresolvable.
    pub fn without(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }
}

impl Default for FakeResolver {
    fn default() -> Self {
        Self::new("/usr/bin")
    }
}

impl ExecutableResolver for FakeResolver {
    fn resolve(&self, program: &Path, cwd: &Path) -> Result<PathBuf> {
        let name = program.display().to_string();
        if self.missing.contains(&name) {
            return Err(HighwayError::ExecutableNotFound {
                name,
                reason: "removed by test".to_string(),
            });
        }

        if program.components().count() == 1 && !program.is_absolute() {
            Ok(self.bin_dir.join(program))
        } else {
            Ok(cwd.join(program))
        }
    }
}
