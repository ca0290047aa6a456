use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use highway::exec::TaskOutcome;
use highway::project::{Artifact, BuildError, BuildSystem, Bundle};

/// Build system that never compiles anything.
///
/// Either hands out an artifact pointing at `bin_dir`, or fails with
/// `BuildError::CompileFailed` carrying `exit_code`.
pub struct FakeBuildSystem {
    result: Result<PathBuf, i32>,
    calls: Arc<AtomicUsize>,
    updates: Arc<AtomicUsize>,
}

impl FakeBuildSystem {
    pub fn succeeding(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            result: Ok(bin_dir.into()),
            calls: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            result: Err(exit_code),
            calls: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `compile` calls.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Shared counter of `update` calls.
    pub fn updates(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.updates)
    }
}

impl BuildSystem for FakeBuildSystem {
    fn compile(&self, bundle: &Bundle) -> Result<Artifact, BuildError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(bin_dir) => Ok(Artifact::new(bin_dir.clone())),
            Err(code) => Err(BuildError::CompileFailed {
                program: "fake-cargo".to_string(),
                manifest: bundle.manifest_path(),
                outcome: TaskOutcome::Failed(*code),
            }),
        }
    }

    fn update(&self, _bundle: &Bundle) -> highway::errors::Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
