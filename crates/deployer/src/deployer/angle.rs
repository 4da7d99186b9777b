//! ANGLE deployment pipeline.
//!
//! Steps, in order:
//! 1. depot_tools checkout
//! 2. ANGLE clone or pull
//! 3. bootstrap + `gclient sync`
//! 4. `gn gen`
//! 5. `autoninja`
//! 6. copy libraries and headers into `dep/angle`
//! 7. list what was staged
//!
//! Any failing command stops the run; re-running skips finished checkouts.

use super::platform::{host_machine, host_system_name, PlatformInfo};
use super::runner::Shell;
use super::state::StepLedger;
use super::{banner, compile, configure, source, stage, sync, toolchain, verify, Deployable, Layout};
use anyhow::Result;

pub struct Angle;

impl Deployable for Angle {
    fn name(&self) -> &'static str {
        "angle"
    }

    fn description(&self) -> &'static str {
        "OpenGL ES implementation (via ANGLE)"
    }

    fn deploy(&self, layout: &Layout, shell: &dyn Shell) -> Result<()> {
        deploy_on(host_system_name(), host_machine(), layout, shell)
    }
}

/// Resolve the host from `uname`-style names, then run the pipeline.
/// An unsupported system fails before any command is issued.
pub fn deploy_on(system: &str, machine: &str, layout: &Layout, shell: &dyn Shell) -> Result<()> {
    let info = PlatformInfo::new(system, machine)?;
    run(layout, &info, shell)
}

/// Run every step for an already detected host.
pub fn run(layout: &Layout, info: &PlatformInfo, shell: &dyn Shell) -> Result<()> {
    banner("Arc Engine - ANGLE Deploy");
    println!("Platform: {}", info.platform);
    println!("Arch: {}", info.arch);
    println!("Output directory: {}", layout.output_dir().display());
    println!();

    let mut ledger = StepLedger::load(&layout.build_root());

    let depot_tools = toolchain::install(layout, shell, &mut ledger)?;
    let overlay = toolchain::overlay(info.platform, &depot_tools);

    let angle_dir = source::acquire(layout, shell, &mut ledger, &overlay)?;
    sync::sync_dependencies(&angle_dir, shell, &overlay)?;
    configure::configure(&angle_dir, info.platform, shell, &overlay)?;
    compile::build(&angle_dir, shell, &overlay)?;

    let staged = stage::copy_to_project(layout, info.platform)?;
    let installed = verify::verify_installation(layout)?;

    println!();
    println!(
        "Staged {} of {} libraries, {} header directories ({} files in lib/, {} in include/)",
        staged.copied_libs.len(),
        staged.copied_libs.len() + staged.missing_libs.len(),
        staged.copied_headers.len(),
        installed.libs.len(),
        installed.header_dirs.len()
    );
    if !staged.missing_libs.is_empty() {
        println!("Missing: {}", staged.missing_libs.join(", "));
    }
    println!();
    banner("✓ ANGLE deployed");
    Ok(())
}
