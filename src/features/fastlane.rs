// src/features/fastlane.rs

use std::path::Path;

use tracing::info;

use crate::context::Context;
use crate::errors::Result;

const FASTLANE: &str = "fastlane";

/// Runs fastlane actions through a [`Context`].
#[derive(Debug, Clone)]
pub struct Fastlane {
    context: Context,
}

impl Fastlane {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// `fastlane <action> [args...]` in `cwd`.
    pub fn action<I, S>(&self, action: &str, arguments: I, cwd: &Path) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        info!(action, cwd = %cwd.display(), "running fastlane");
        let arguments =
            std::iter::once(action.to_string()).chain(arguments.into_iter().map(Into::into));
        self.context.run_command(FASTLANE, arguments, cwd)?;
        Ok(())
    }

    pub fn gym<I, S>(&self, arguments: I, cwd: &Path) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action("gym", arguments, cwd)
    }

    pub fn scan<I, S>(&self, arguments: I, cwd: &Path) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action("scan", arguments, cwd)
    }
}
