//! Ninja build of the two ANGLE shared libraries.

use super::configure::OUT_DIR;
use super::env::EnvOverlay;
use super::runner::Shell;
use anyhow::Result;
use std::path::Path;

pub const TARGETS: &[&str] = &["libEGL", "libGLESv2"];

pub fn build_command() -> String {
    format!("autoninja -C {OUT_DIR} {}", TARGETS.join(" "))
}

/// Incremental rebuilds are left to ninja.
pub fn build(source_dir: &Path, shell: &dyn Shell, overlay: &EnvOverlay) -> Result<()> {
    println!("=== Building ANGLE (this takes 10-30 minutes) ===");
    shell.run(&build_command(), Some(source_dir), overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployer::runner::testing::RecordingShell;

    #[test]
    fn test_build_command() {
        assert_eq!(build_command(), "autoninja -C out/Release libEGL libGLESv2");
    }

    #[test]
    fn test_build_failure_propagates() {
        let shell = RecordingShell::new().failing("autoninja", 1);
        assert!(build(Path::new("/b/angle"), &shell, &EnvOverlay::empty()).is_err());
    }
}
