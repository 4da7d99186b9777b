//! Post-deploy listing of the staged output.

use super::Layout;
use anyhow::{Context, Result};
use std::path::Path;

/// Files in `lib/` and directories in `include/`, sorted.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Installation {
    pub libs: Vec<String>,
    pub header_dirs: Vec<String>,
}

/// Print what ended up in the output tree. Absence is not an error.
pub fn verify_installation(layout: &Layout) -> Result<Installation> {
    println!("\n=== Verifying installation ===");

    let lib_dir = layout.lib_dir();
    let include_dir = layout.include_dir();

    println!("\nLibrary directory: {}", lib_dir.display());
    let libs = list(&lib_dir, false)?;
    for name in &libs {
        println!("  ✓ {name}");
    }

    println!("\nHeader directory: {}", include_dir.display());
    let header_dirs = list(&include_dir, true)?;
    for name in &header_dirs {
        println!("  ✓ {name}/");
    }

    Ok(Installation { libs, header_dirs })
}

fn list(dir: &Path, dirs_only: bool) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Reading {}", dir.display()))? {
        let entry = entry?;
        // follows symlinks, so a linked include directory still counts
        if dirs_only && !entry.path().is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
