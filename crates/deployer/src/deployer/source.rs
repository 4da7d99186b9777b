//! ANGLE source checkout.

use super::env::EnvOverlay;
use super::runner::Shell;
use super::state::{inspect_checkout, Checkout, StepLedger, StepStatus};
use super::Layout;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const ANGLE_REPO: &str = "https://chromium.googlesource.com/angle/angle";

/// Ledger key for the source clone.
const STEP: &str = "angle";

/// Clone ANGLE, or pull if a checkout already exists.
///
/// Pulling in place avoids downloading the full history again on every run.
pub fn acquire(
    layout: &Layout,
    shell: &dyn Shell,
    ledger: &mut StepLedger,
    overlay: &EnvOverlay,
) -> Result<PathBuf> {
    let dir = layout.source_dir();

    if inspect_checkout(ledger, STEP, &dir)? == Checkout::Present {
        println!("ANGLE already present, updating...");
        shell.run("git pull --progress", Some(&dir), overlay)?;
        return Ok(dir);
    }

    println!("=== Cloning ANGLE ===");
    let build_root = layout.build_root();
    std::fs::create_dir_all(&build_root)
        .with_context(|| format!("Creating {}", build_root.display()))?;

    ledger.mark(STEP, StepStatus::InProgress)?;
    shell.run(
        &format!("git clone --progress {ANGLE_REPO}"),
        Some(&build_root),
        overlay,
    )?;
    ledger.mark(STEP, StepStatus::Done)?;

    Ok(dir)
}
