//! ANGLE's own bootstrap and `gclient sync`.
//!
//! Both are idempotent on ANGLE's side, so they run on every deploy.

use super::env::EnvOverlay;
use super::runner::Shell;
use anyhow::Result;
use std::path::Path;

pub const BOOTSTRAP: &str = "python3 scripts/bootstrap.py";
pub const SYNC: &str = "gclient sync";

/// Bootstrap installs the gclient config that sync needs, so order is fixed.
pub fn sync_dependencies(source_dir: &Path, shell: &dyn Shell, overlay: &EnvOverlay) -> Result<()> {
    println!("=== Syncing dependencies (this may take a while) ===");
    shell.run(BOOTSTRAP, Some(source_dir), overlay)?;
    shell.run(SYNC, Some(source_dir), overlay)?;
    Ok(())
}
