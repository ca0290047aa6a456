// src/errors.rs

//! Crate-wide error types.
//!
//! - [`HighwayError`] is the typed error every fallible operation returns.
//! - [`AnyError`] erases the concrete type of a collaborator's error (for
//!   example a [`crate::project::BuildError`]) so it can travel through a
//!   single variant without losing its identity.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::exec::TaskOutcome;

#[derive(Error, Debug)]
pub enum HighwayError {
    #[error("Executable not found: '{name}' ({reason})")]
    ExecutableNotFound { name: String, reason: String },

    #[error("Task for '{}' has already been run", .0.display())]
    AlreadyRun(PathBuf),

    #[error("Task for '{}' is {state}, expected it to be {expected}", .executable.display())]
    UnexpectedState {
        executable: PathBuf,
        state: String,
        expected: &'static str,
    },

    #[error("Build failed")]
    BuildFailed(#[source] AnyError),

    #[error("Expected executable is missing: {}", .0.display())]
    ExecutableMissing(PathBuf),

    #[error("Execution of '{}' failed: {outcome}", .executable.display())]
    ExecutionFailed {
        executable: PathBuf,
        outcome: TaskOutcome,
    },

    #[error("'{tag}' is not a valid version tag: {reason}")]
    InvalidVersionTag { tag: String, reason: &'static str },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T, E = HighwayError> = std::result::Result<T, E>;

/// Type-erased error that keeps the original error retrievable.
///
/// Erasing an `AnyError` again yields the same `AnyError`, never a nested
/// one, so `downcast_ref` always sees the original error type.
pub struct AnyError {
    inner: Box<dyn StdError + Send + Sync + 'static>,
}

impl AnyError {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(error);
        match boxed.downcast::<AnyError>() {
            Ok(erased) => *erased,
            Err(inner) => Self { inner },
        }
    }

    /// The original, un-erased error.
    pub fn underlying(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Recover the original error by value, or get `self` back if the type
    /// does not match.
    pub fn downcast<E>(self) -> std::result::Result<E, Self>
    where
        E: StdError + 'static,
    {
        match self.inner.downcast::<E>() {
            Ok(original) => Ok(*original),
            Err(inner) => Err(Self { inner }),
        }
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Debug for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

// Transparent: the chain continues with the original error's own source.
impl StdError for AnyError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}
