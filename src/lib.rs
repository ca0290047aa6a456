// src/lib.rs

pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod exec;
pub mod features;
pub mod fs;
pub mod logging;
pub mod project;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::load_or_default;
use crate::context::Context;
use crate::fs::RealFileSystem;
use crate::project::{OperationDescriptor, ProjectTool};

/// High-level entry point used by `main.rs`.
///
/// Loads the config, wires the local context (real processes, `PATH`
/// lookup, real file system) into a [`ProjectTool`] and dispatches the
/// subcommand.
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(&RealFileSystem, args.config.as_deref())?;
    let root = config_root_dir(args.config.as_deref())?;
    debug!(root = %root.display(), ?cfg, "configuration loaded");

    let context = Context::local()?;
    let tool = ProjectTool::from_config(context, &cfg, &root);

    match args.command {
        Command::List => print_operations(&tool.available_operations()),
        Command::Run { name, args } => {
            let output = tool.execute_operation(&name, &args)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
        Command::Build => {
            let result = tool.build()?;
            println!("{}", result.executable.display());
        }
        Command::Update => tool.update()?,
    }

    Ok(())
}

/// Directory the bundle path is relative to.
///
/// - With an explicit config path that has a parent, that parent.
/// - Otherwise the current working directory.
fn config_root_dir(config_path: Option<&Path>) -> Result<PathBuf> {
    let dir = match config_path.and_then(Path::parent) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(std::path::absolute(dir)?)
}

fn print_operations(operations: &[OperationDescriptor]) {
    if operations.is_empty() {
        println!("no operations available");
        return;
    }

    let width = operations.iter().map(|op| op.name.len()).max().unwrap_or(0);
    for op in operations {
        println!("  {:<width$}  {}", op.name, op.description);
        if let Some(ref usage) = op.usage {
            println!("  {:<width$}  usage: {usage}", "");
        }
    }
}
