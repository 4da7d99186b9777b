//! depot_tools provisioning.

use super::env::EnvOverlay;
use super::platform::Platform;
use super::runner::Shell;
use super::state::{inspect_checkout, Checkout, StepLedger, StepStatus};
use super::Layout;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEPOT_TOOLS_REPO: &str = "https://chromium.googlesource.com/chromium/tools/depot_tools.git";

/// Directory the clone produces under the build root.
pub const DIR_NAME: &str = "depot_tools";

/// Make sure depot_tools is checked out. An existing checkout is reused as is.
pub fn install(layout: &Layout, shell: &dyn Shell, ledger: &mut StepLedger) -> Result<PathBuf> {
    let dir = layout.toolchain_dir();

    if inspect_checkout(ledger, DIR_NAME, &dir)? == Checkout::Present {
        println!("depot_tools already present, skipping download");
        return Ok(dir);
    }

    println!("=== Downloading depot_tools ===");
    let build_root = layout.build_root();
    std::fs::create_dir_all(&build_root)
        .with_context(|| format!("Creating {}", build_root.display()))?;

    ledger.mark(DIR_NAME, StepStatus::InProgress)?;
    shell.run(
        &format!("git clone --progress {DEPOT_TOOLS_REPO}"),
        Some(&build_root),
        &EnvOverlay::empty(),
    )?;
    ledger.mark(DIR_NAME, StepStatus::Done)?;

    Ok(dir)
}

/// Environment for everything that needs depot_tools on `PATH`.
///
/// On windows the Google-internal toolchain download is disabled so the
/// locally installed Visual Studio is used.
pub fn overlay(platform: Platform, toolchain_dir: &Path) -> EnvOverlay {
    let overlay = EnvOverlay::for_platform(platform).with_path_prefix(toolchain_dir);
    match platform {
        Platform::Windows => overlay.with_var("DEPOT_TOOLS_WIN_TOOLCHAIN", "0"),
        Platform::Macos | Platform::Linux => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployer::runner::testing::RecordingShell;

    #[test]
    fn test_clones_once() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path(), "angle").unwrap();
        let shell = RecordingShell::new().creating("git clone", layout.toolchain_dir());
        let mut ledger = StepLedger::load(&layout.build_root());

        let first = install(&layout, &shell, &mut ledger).unwrap();
        let second = install(&layout, &shell, &mut ledger).unwrap();

        assert_eq!(first, layout.toolchain_dir());
        assert_eq!(first, second);
        assert_eq!(shell.count_prefix("git clone"), 1);
        assert_eq!(ledger.status(DIR_NAME), StepStatus::Done);

        let calls = shell.calls.borrow();
        assert_eq!(
            calls[0].command,
            format!("git clone --progress {DEPOT_TOOLS_REPO}")
        );
        assert_eq!(calls[0].cwd.as_deref(), Some(layout.build_root().as_path()));
    }

    #[test]
    fn test_existing_checkout_skips_clone() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path(), "angle").unwrap();
        std::fs::create_dir_all(layout.toolchain_dir()).unwrap();
        let shell = RecordingShell::new();
        let mut ledger = StepLedger::load(&layout.build_root());

        install(&layout, &shell, &mut ledger).unwrap();
        assert!(shell.commands().is_empty());
    }

    #[test]
    fn test_failed_clone_stays_in_progress() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path(), "angle").unwrap();
        let shell = RecordingShell::new().failing("git clone", 128);
        let mut ledger = StepLedger::load(&layout.build_root());

        assert!(install(&layout, &shell, &mut ledger).is_err());
        assert_eq!(
            StepLedger::load(&layout.build_root()).status(DIR_NAME),
            StepStatus::InProgress
        );
    }

    #[test]
    fn test_interrupted_clone_is_redone() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::new(tmp.path(), "angle").unwrap();
        std::fs::create_dir_all(layout.toolchain_dir().join("partial")).unwrap();
        let mut ledger = StepLedger::load(&layout.build_root());
        ledger.mark(DIR_NAME, StepStatus::InProgress).unwrap();

        let shell = RecordingShell::new().creating("git clone", layout.toolchain_dir());
        install(&layout, &shell, &mut ledger).unwrap();

        assert_eq!(shell.count_prefix("git clone"), 1);
        assert!(!layout.toolchain_dir().join("partial").exists());
        assert_eq!(ledger.status(DIR_NAME), StepStatus::Done);
    }

    #[test]
    fn test_unix_overlay() {
        let overlay = overlay(Platform::Linux, Path::new("/b/depot_tools"));
        assert_eq!(overlay.path_prefix(), [PathBuf::from("/b/depot_tools")]);
        assert_eq!(overlay.var("DEPOT_TOOLS_WIN_TOOLCHAIN"), None);
    }

    #[test]
    fn test_windows_overlay_disables_google_toolchain() {
        let overlay = overlay(Platform::Windows, Path::new(r"C:\b\depot_tools"));
        assert_eq!(overlay.var("DEPOT_TOOLS_WIN_TOOLCHAIN"), Some("0"));
        assert_eq!(
            overlay.search_path(std::ffi::OsStr::new(r"C:\Windows")),
            r"C:\b\depot_tools;C:\Windows"
        );
    }

    /// `target` spelled relative to the current directory.
    #[cfg(unix)]
    fn relative_to_cwd(target: &Path) -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        let mut rel = PathBuf::new();
        for _ in cwd.components().skip(1) {
            rel.push("..");
        }
        rel.join(target.strip_prefix("/").unwrap())
    }

    #[cfg(unix)]
    #[test]
    fn test_tools_found_from_source_dir_with_relative_root() {
        use crate::deployer::runner::{Shell, SystemShell};
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = relative_to_cwd(tmp.path());
        assert!(root.is_relative());

        let layout = Layout::new(&root, "angle").unwrap();
        let tool = layout.toolchain_dir().join("gclient");
        std::fs::create_dir_all(layout.toolchain_dir()).unwrap();
        std::fs::create_dir_all(layout.source_dir()).unwrap();
        std::fs::write(&tool, "#!/bin/sh\ntouch synced\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let overlay = overlay(Platform::Linux, &layout.toolchain_dir());
        assert!(overlay.path_prefix()[0].is_absolute());

        SystemShell
            .run("gclient", Some(&layout.source_dir()), &overlay)
            .unwrap();
        assert!(layout.source_dir().join("synced").exists());
    }
}
