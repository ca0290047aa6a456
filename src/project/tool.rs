// src/project/tool.rs

//! Working with the plugin project.
//!
//! [`ProjectTool`] can:
//! - build the bundle and locate its executable,
//! - build and then run the executable, capturing its stdout,
//! - list the operations the plugin offers,
//! - update the bundle's dependencies through its build system.
//!
//! Build strictly precedes launch: if the build fails, nothing is located or
//! spawned.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{ConfigFile, PluginSection};
use crate::context::Context;
use crate::errors::{AnyError, HighwayError, Result};
use crate::exec::{CaptureMode, CapturedOutput};
use crate::project::build::{Artifact, BuildSystem, CargoBuildSystem};
use crate::project::bundle::Bundle;
use crate::project::discovery::{decode_operations, OperationDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub executable: PathBuf,
    pub artifact: Artifact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildThenExecuteResult {
    pub build: BuildResult,
    pub output: CapturedOutput,
}

pub struct ProjectTool {
    context: Context,
    compiler: Box<dyn BuildSystem>,
    bundle: Bundle,
    plugin: PluginSection,
}

impl ProjectTool {
    pub fn new(context: Context, compiler: Box<dyn BuildSystem>, bundle: Bundle) -> Self {
        Self {
            context,
            compiler,
            bundle,
            plugin: PluginSection::default(),
        }
    }

    /// Tool for the bundle described by `cfg`, built with cargo.
    ///
    /// `root` is the directory the bundle path is relative to.
    pub fn from_config(context: Context, cfg: &ConfigFile, root: &Path) -> Self {
        let compiler = CargoBuildSystem::from_config(context.clone(), &cfg.build);
        let bundle = Bundle::from_config(&cfg.bundle, root);
        Self::new(context, Box::new(compiler), bundle)
            .with_plugin_settings(cfg.plugin.clone())
    }

    pub fn with_plugin_settings(mut self, plugin: PluginSection) -> Self {
        self.plugin = plugin;
        self
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// Build the bundle and derive where its executable should be.
    pub fn build(&self) -> Result<BuildResult> {
        let artifact = self
            .compiler
            .compile(&self.bundle)
            .map_err(|err| HighwayError::BuildFailed(AnyError::new(err)))?;
        let executable = self.bundle.executable_path(artifact.bin_dir());
        Ok(BuildResult {
            executable,
            artifact,
        })
    }

    /// Build, then run the executable with `arguments` and capture stdout.
    ///
    /// The plugin runs in the bundle's parent directory. Any outcome other
    /// than success is `ExecutionFailed`; partial output is dropped.
    pub fn build_then_execute<I, S>(&self, arguments: I) -> Result<BuildThenExecuteResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let build = self.build()?;

        if !self.context.fs.is_file(&build.executable) {
            return Err(HighwayError::ExecutableMissing(build.executable));
        }

        let mut task = self
            .context
            .task(
                &build.executable,
                arguments,
                self.bundle.launch_directory(),
                CaptureMode::Capture,
            )?
            .inherit_env(&self.plugin.pass_env);

        info!(executable = %task.executable().display(), "launching plugin");

        self.context.executor.execute(&mut task)?;
        task.ensure_success()?;

        let output = task.into_output().unwrap_or_default();
        Ok(BuildThenExecuteResult { build, output })
    }

    /// Operations the plugin offers; empty if it cannot be built, run or
    /// understood.
    pub fn available_operations(&self) -> Vec<OperationDescriptor> {
        match self.build_then_execute([self.plugin.list_argument.as_str()]) {
            Ok(result) => decode_operations(result.output.as_bytes()),
            Err(err) => {
                warn!(error = %err, "could not query plugin for operations");
                Vec::new()
            }
        }
    }

    /// Run one plugin operation and return what it printed.
    pub fn execute_operation(&self, name: &str, extra_args: &[String]) -> Result<CapturedOutput> {
        let arguments = std::iter::once(name.to_string()).chain(extra_args.iter().cloned());
        Ok(self.build_then_execute(arguments)?.output)
    }

    /// Update the bundle's dependencies with the same build system that
    /// compiles it.
    pub fn update(&self) -> Result<()> {
        self.compiler.update(&self.bundle)
    }
}
