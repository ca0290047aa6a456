// src/exec/executor.rs

//! Running tasks to completion.
//!
//! The rest of the crate talks to an [`Executor`] instead of spawning
//! processes itself. Production code uses [`LocalExecutor`]; tests can
//! provide their own implementation that never spawns anything, as long as
//! it drives the task through `begin` / `finish`.

use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::errors::Result;
use crate::exec::task::Task;

/// Runs one task synchronously.
///
/// `execute` returns once the task has reached a terminal state. A
/// non-successful outcome is recorded on the task, not returned as an
/// error; only an illegal state transition (e.g. running a task twice)
/// is an `Err`.
pub trait Executor: Send + Sync {
    fn execute(&self, task: &mut Task) -> Result<()>;
}

/// Executor that spawns real OS processes.
///
/// Owns a current-thread Tokio runtime and blocks on it for the lifetime of
/// each child process; it must not be called from inside another Tokio
/// runtime.
#[derive(Debug)]
pub struct LocalExecutor {
    runtime: Runtime,
}

impl LocalExecutor {
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime })
    }
}

impl Executor for LocalExecutor {
    fn execute(&self, task: &mut Task) -> Result<()> {
        task.begin()?;

        info!(
            executable = %task.executable().display(),
            args = ?task.arguments(),
            cwd = %task.current_dir().display(),
            "launching"
        );

        let (outcome, stdout) = self.runtime.block_on(task.spawn_and_wait());
        info!(executable = %task.executable().display(), %outcome, "exited");
        task.finish(outcome, stdout)
    }
}
