// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`task`] models one external process invocation and its state machine.
//! - [`executor`] provides the `Executor` trait and the blocking
//!   `LocalExecutor` used in production.
//! - [`resolver`] locates executables before a task is created.

pub mod executor;
pub mod resolver;
pub mod task;

pub use executor::{Executor, LocalExecutor};
pub use resolver::{ExecutableResolver, SystemResolver};
pub use task::{CaptureMode, CapturedOutput, Task, TaskOutcome, TaskState};
