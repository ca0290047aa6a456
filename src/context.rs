// src/context.rs

//! Collaborators shared by everything that launches processes.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::errors::Result;
use crate::exec::{
    CaptureMode, CapturedOutput, ExecutableResolver, Executor, LocalExecutor, SystemResolver, Task,
};
use crate::fs::{FileSystem, RealFileSystem};

/// Variables forwarded to helper commands such as `cargo`.
pub const PASSTHROUGH_ENV: &[&str] = &[
    "PATH",
    "HOME",
    "CARGO_HOME",
    "RUSTUP_HOME",
    "RUSTUP_TOOLCHAIN",
];

/// Executor, resolver and file system used for one host invocation.
#[derive(Clone)]
pub struct Context {
    pub executor: Arc<dyn Executor>,
    pub resolver: Arc<dyn ExecutableResolver>,
    pub fs: Arc<dyn FileSystem>,
}

impl Context {
    pub fn new(
        executor: Arc<dyn Executor>,
        resolver: Arc<dyn ExecutableResolver>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            executor,
            resolver,
            fs,
        }
    }

    /// Real processes, `PATH` lookup, real file system.
    pub fn local() -> Result<Self> {
        Ok(Self::new(
            Arc::new(LocalExecutor::new()?),
            Arc::new(SystemResolver::new()),
            Arc::new(RealFileSystem),
        ))
    }

    pub fn contains_executable(&self, program: &str) -> bool {
        self.resolver.contains(program)
    }

    /// Create an idle task whose executable is resolved by this context.
    pub fn task<I, S>(
        &self,
        program: impl AsRef<Path>,
        arguments: I,
        cwd: &Path,
        capture: CaptureMode,
    ) -> Result<Task>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Task::new(program, arguments, cwd, capture, self.resolver.as_ref())
    }

    /// Execute `task` and require it to succeed.
    pub fn run(&self, mut task: Task) -> Result<Task> {
        self.executor.execute(&mut task)?;
        task.ensure_success()?;
        Ok(task)
    }

    /// Run a command by name, discarding its stdout.
    pub fn run_command<I, S>(&self, program: &str, arguments: I, cwd: &Path) -> Result<Task>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let task = self
            .task(program, arguments, cwd, CaptureMode::Discard)?
            .inherit_env(PASSTHROUGH_ENV);
        self.run(task)
    }

    /// Run a command by name and return what it wrote to stdout.
    pub fn capture_command<I, S>(
        &self,
        program: &str,
        arguments: I,
        cwd: &Path,
    ) -> Result<CapturedOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let task = self
            .task(program, arguments, cwd, CaptureMode::Capture)?
            .inherit_env(PASSTHROUGH_ENV);
        Ok(self.run(task)?.into_output().unwrap_or_default())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}
