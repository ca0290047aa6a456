#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use highway::config::{ConfigFile, RawConfigFile};
use highway::context::Context;
use highway::exec::{ExecutableResolver, Executor};
use highway::fs::mock::MockFileSystem;
use highway::project::{BuildSystem, Bundle, ProjectTool};

use crate::fake_executor::{ExecutedTask, FakeExecutor};
use crate::fake_resolver::FakeResolver;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn bundle_directory(mut self, dir: &str) -> Self {
        self.config.bundle.directory = PathBuf::from(dir);
        self
    }

    pub fn binary(mut self, name: &str) -> Self {
        self.config.bundle.binary = name.to_string();
        self
    }

    pub fn cargo(mut self, program: &str) -> Self {
        self.config.build.cargo = program.to_string();
        self
    }

    pub fn release(mut self, val: bool) -> Self {
        self.config.build.release = val;
        self
    }

    pub fn list_argument(mut self, arg: &str) -> Self {
        self.config.plugin.list_argument = arg.to_string();
        self
    }

    pub fn pass_env(mut self, keys: &[&str]) -> Self {
        self.config.plugin.pass_env = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a pipeline test needs to observe.
pub struct Harness {
    pub tool: ProjectTool,
    pub fs: MockFileSystem,
    pub executed: Arc<Mutex<Vec<ExecutedTask>>>,
}

impl Harness {
    pub fn executed(&self) -> Vec<ExecutedTask> {
        self.executed.lock().unwrap().clone()
    }
}

/// Builder wiring a `ProjectTool` to fakes: mock file system, fake
/// resolver and a scripted executor.
pub struct HarnessBuilder {
    bundle: Bundle,
    executor: Option<Box<dyn FnOnce(Arc<Mutex<Vec<ExecutedTask>>>) -> FakeExecutor>>,
    resolver: Arc<dyn ExecutableResolver>,
    fs: MockFileSystem,
}

impl HarnessBuilder {
    pub fn new(bundle_dir: impl AsRef<Path>) -> Self {
        Self {
            bundle: Bundle::new(bundle_dir.as_ref(), "_highway"),
            executor: None,
            resolver: Arc::new(FakeResolver::default()),
            fs: MockFileSystem::new(),
        }
    }

    pub fn executor(
        mut self,
        make: impl FnOnce(Arc<Mutex<Vec<ExecutedTask>>>) -> FakeExecutor + 'static,
    ) -> Self {
        self.executor = Some(Box::new(make));
        self
    }

    pub fn resolver(mut self, resolver: impl ExecutableResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Pretend `path` exists on the mock file system.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.fs.add_file(path, Vec::<u8>::new());
        self
    }

    pub fn build(self, compiler: impl BuildSystem + 'static) -> Harness {
        let executed = Arc::new(Mutex::new(Vec::new()));
        let executor: Arc<dyn Executor> = match self.executor {
            Some(make) => Arc::new(make(Arc::clone(&executed))),
            None => Arc::new(FakeExecutor::new(Arc::clone(&executed))),
        };

        let context = Context::new(executor, self.resolver, Arc::new(self.fs.clone()));
        let tool = ProjectTool::new(context, Box::new(compiler), self.bundle);

        Harness {
            tool,
            fs: self.fs,
            executed,
        }
    }
}
