//! Executable shell scripts for tests that spawn real processes.
//!
//! Scripts run with an empty environment, so bodies should stick to shell
//! builtins (`printf`, `echo`, `exit`, redirections) rather than `PATH`
//! lookups.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write `body` as `#!/bin/sh` script `dir/name` and make it executable.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(dir).with_context(|| format!("creating dir {:?}", dir))?;
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .with_context(|| format!("writing script {:?}", path))?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod {:?}", path))?;
    Ok(path)
}
