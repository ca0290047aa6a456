// src/features/git_autotag.rs

//! Version tagging through the `git-autotag` tool.
//!
//! `git-autotag` prints the tag it created (or would create with `-n`).
//! Only `MAJOR.MINOR.PATCH`-shaped tags, i.e. exactly two dots, are
//! accepted.

use std::path::Path;

use tracing::info;

use crate::context::Context;
use crate::errors::{HighwayError, Result};

const GIT_AUTOTAG: &str = "git-autotag";

#[derive(Debug, Clone)]
pub struct GitAutotag {
    context: Context,
}

impl GitAutotag {
    /// Fails with `ExecutableNotFound` if `git-autotag` cannot be resolved.
    pub fn new(context: Context) -> Result<Self> {
        if !context.contains_executable(GIT_AUTOTAG) {
            return Err(HighwayError::ExecutableNotFound {
                name: GIT_AUTOTAG.to_string(),
                reason: "not found in PATH".to_string(),
            });
        }
        Ok(Self { context })
    }

    /// Tag the repository at `repo`, or only compute the tag if `dry_run`.
    pub fn autotag(&self, repo: &Path, dry_run: bool) -> Result<String> {
        let arguments: &[&str] = if dry_run { &["-n"] } else { &[] };
        let output = self
            .context
            .capture_command(GIT_AUTOTAG, arguments.iter().copied(), repo)?;

        let raw = std::str::from_utf8(output.as_bytes()).map_err(|_| {
            HighwayError::InvalidVersionTag {
                tag: String::from_utf8_lossy(output.as_bytes()).into_owned(),
                reason: "output is not valid UTF-8",
            }
        })?;
        let tag = parse_version_tag(raw)?;

        info!(%tag, dry_run, repo = %repo.display(), "autotag");
        Ok(tag)
    }
}

/// Trim `raw` and require exactly two dots.
pub fn parse_version_tag(raw: &str) -> Result<String> {
    let tag = raw.trim();
    if tag.matches('.').count() != 2 {
        return Err(HighwayError::InvalidVersionTag {
            tag: tag.to_string(),
            reason: "must contain exactly two '.'",
        });
    }
    Ok(tag.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_part_versions() {
        assert_eq!(parse_version_tag("1.4.2").unwrap(), "1.4.2");
        assert_eq!(parse_version_tag("  v0.10.3\n").unwrap(), "v0.10.3");
    }

    #[test]
    fn rejects_wrong_number_of_dots() {
        for raw in ["", "\n", "1", "1.4", "1.4.2.7", "1.4.2.\n"] {
            match parse_version_tag(raw) {
                Err(HighwayError::InvalidVersionTag { tag, .. }) => assert_eq!(tag, raw.trim()),
                other => panic!("expected InvalidVersionTag for {raw:?}, got {other:?}"),
            }
        }
    }
}
