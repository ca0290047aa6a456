// src/project/mod.rs

//! The plugin project ("bundle") and the build-then-execute pipeline.
//!
//! - [`bundle`] knows where the bundle lives and what it produces.
//! - [`build`] defines the `BuildSystem` collaborator and its cargo
//!   implementation.
//! - [`tool`] composes build, launch, capture and decoding.
//! - [`discovery`] decodes the plugin's operation list.

pub mod build;
pub mod bundle;
pub mod discovery;
pub mod tool;

pub use build::{Artifact, BuildError, BuildSystem, CargoBuildSystem};
pub use bundle::Bundle;
pub use discovery::{decode_operations, try_decode_operations, OperationDescriptor};
pub use tool::{BuildResult, BuildThenExecuteResult, ProjectTool};
