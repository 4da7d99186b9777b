//! Dependency registry - everything `--all` deploys, in order.

use super::{angle::Angle, Deployable};

pub static DEPENDENCIES: &[&dyn Deployable] = &[&Angle];

/// Get dependency by name.
#[must_use]
pub fn get(name: &str) -> Option<&'static dyn Deployable> {
    DEPENDENCIES.iter().find(|d| d.name() == name).copied()
}

/// List all dependency names.
pub fn names() -> impl Iterator<Item = &'static str> {
    DEPENDENCIES.iter().map(|d| d.name())
}

/// Print the `--list` output.
pub fn print_list() {
    println!("Available dependencies:");
    for dep in DEPENDENCIES {
        println!("  - {:8} {}", dep.name(), dep.description());
    }
}
