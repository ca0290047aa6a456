// src/project/build.rs

//! Build collaborator: turns a bundle into compiled output.
//!
//! The pipeline only reads the [`Artifact`]'s bin directory; how the code
//! gets compiled is up to the [`BuildSystem`] implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::BuildSection;
use crate::context::Context;
use crate::errors::{self, HighwayError};
use crate::exec::TaskOutcome;
use crate::project::bundle::Bundle;

/// Location of a finished build's binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bin_dir: PathBuf,
}

impl Artifact {
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("could not run '{program}'")]
    Launch {
        program: String,
        #[source]
        source: HighwayError,
    },

    #[error("'{program} build' for {} {outcome}", .manifest.display())]
    CompileFailed {
        program: String,
        manifest: PathBuf,
        outcome: TaskOutcome,
    },
}

pub trait BuildSystem: Send + Sync {
    fn compile(&self, bundle: &Bundle) -> Result<Artifact, BuildError>;

    /// Refresh the bundle's locked dependencies.
    fn update(&self, bundle: &Bundle) -> errors::Result<()>;
}

/// Builds the bundle with `cargo build`.
#[derive(Debug, Clone)]
pub struct CargoBuildSystem {
    context: Context,
    program: String,
    release: bool,
    target_dir: Option<PathBuf>,
}

impl CargoBuildSystem {
    pub fn new(context: Context) -> Self {
        Self::from_config(context, &BuildSection::default())
    }

    pub fn from_config(context: Context, section: &BuildSection) -> Self {
        Self {
            context,
            program: section.cargo.clone(),
            release: section.release,
            target_dir: section.target_dir.clone(),
        }
    }

    fn target_dir(&self, bundle: &Bundle) -> PathBuf {
        match &self.target_dir {
            Some(dir) => bundle.directory().join(dir),
            None => bundle.directory().join("target"),
        }
    }

    fn profile_dir(&self) -> &'static str {
        if self.release { "release" } else { "debug" }
    }

    fn arguments(&self, bundle: &Bundle, target_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "--manifest-path".to_string(),
            bundle.manifest_path().display().to_string(),
            "--target-dir".to_string(),
            target_dir.display().to_string(),
        ];
        if self.release {
            args.push("--release".to_string());
        }
        args
    }
}

impl BuildSystem for CargoBuildSystem {
    fn compile(&self, bundle: &Bundle) -> Result<Artifact, BuildError> {
        let target_dir = self.target_dir(bundle);
        let args = self.arguments(bundle, &target_dir);

        info!(
            manifest = %bundle.manifest_path().display(),
            profile = self.profile_dir(),
            "building bundle"
        );

        match self
            .context
            .run_command(&self.program, args, bundle.directory())
        {
            Ok(_) => Ok(Artifact::new(target_dir.join(self.profile_dir()))),
            Err(HighwayError::ExecutionFailed { outcome, .. }) => Err(BuildError::CompileFailed {
                program: self.program.clone(),
                manifest: bundle.manifest_path(),
                outcome,
            }),
            Err(source) => Err(BuildError::Launch {
                program: self.program.clone(),
                source,
            }),
        }
    }

    fn update(&self, bundle: &Bundle) -> errors::Result<()> {
        info!(bundle = %bundle.directory().display(), "updating bundle dependencies");
        self.context
            .run_command(&self.program, ["update"], bundle.directory())?;
        Ok(())
    }
}
