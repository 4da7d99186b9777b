//! Copy built libraries and public headers into the host project.

use super::platform::Platform;
use super::Layout;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Header directories under ANGLE's `include/` that the engine consumes.
pub const HEADER_DIRS: &[&str] = &["EGL", "GLES2", "GLES3", "KHR"];

/// Binaries expected in the build output for `platform`.
pub fn lib_files(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Macos => &["libEGL.dylib", "libGLESv2.dylib"],
        Platform::Windows => &[
            "libEGL.dll",
            "libGLESv2.dll",
            "libEGL.dll.lib",
            "libGLESv2.dll.lib",
        ],
        Platform::Linux => &["libEGL.so", "libGLESv2.so"],
    }
}

/// What a staging pass copied and what it could not find.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StageReport {
    pub copied_libs: Vec<String>,
    pub missing_libs: Vec<String>,
    pub copied_headers: Vec<String>,
}

/// Stage libraries into `lib/` and headers into `include/`.
///
/// A missing library is a warning. Each header directory is replaced
/// wholesale so nothing from an older ANGLE survives.
pub fn copy_to_project(layout: &Layout, platform: Platform) -> Result<StageReport> {
    println!("=== Copying to project ===");

    let lib_dir = layout.lib_dir();
    let include_dir = layout.include_dir();
    fs::create_dir_all(&lib_dir).with_context(|| format!("Creating {}", lib_dir.display()))?;
    fs::create_dir_all(&include_dir)
        .with_context(|| format!("Creating {}", include_dir.display()))?;

    let release_dir = layout.build_output_dir();
    let include_src = layout.include_src_dir();
    let mut report = StageReport::default();

    for lib in lib_files(platform) {
        let src = release_dir.join(lib);
        if src.exists() {
            println!("  Copied: {lib}");
            fs::copy(&src, lib_dir.join(lib))
                .with_context(|| format!("Copying {}", src.display()))?;
            report.copied_libs.push((*lib).to_string());
        } else {
            println!("  Warning: {lib} not found");
            report.missing_libs.push((*lib).to_string());
        }
    }

    for header_dir in HEADER_DIRS {
        let src = include_src.join(header_dir);
        if !src.is_dir() {
            continue;
        }
        let dst = include_dir.join(header_dir);
        println!("  Copied headers: {header_dir}/");
        if dst.exists() {
            fs::remove_dir_all(&dst).with_context(|| format!("Removing {}", dst.display()))?;
        }
        copy_dir_all(&src, &dst)?;
        report.copied_headers.push((*header_dir).to_string());
    }

    Ok(report)
}

fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.with_context(|| format!("Walking {}", src.display()))?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dst.join(rel);
        if entry.path().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Creating {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Copying {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}
