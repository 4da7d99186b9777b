//! Third-party dependency deployment.
//!
//! Structure:
//! - `platform` - host OS / CPU detection
//! - `env` - environment overlay handed to child processes
//! - `runner` - the [`runner::Shell`] every external command goes through
//! - `state` - clone progress ledger (resumability)
//! - `toolchain`, `source`, `sync`, `configure`, `compile` - pipeline steps
//! - `stage`, `verify` - artifact delivery into the host project
//! - `angle` - the ANGLE pipeline
//! - `registry` - deployable dependencies known to the CLI

pub mod angle;
pub mod compile;
pub mod configure;
pub mod env;
pub mod error;
pub mod platform;
pub mod registry;
pub mod runner;
pub mod source;
pub mod stage;
pub mod state;
pub mod sync;
pub mod toolchain;
pub mod verify;

use anyhow::{Context, Result};
use runner::Shell;
use std::path::{Path, PathBuf};

/// A third-party dependency the deployer can build and stage.
pub trait Deployable: Sync {
    /// Short name used on the command line.
    fn name(&self) -> &'static str;

    /// One-line description for `--list`.
    fn description(&self) -> &'static str;

    /// Run the full pipeline for this dependency.
    fn deploy(&self, layout: &Layout, shell: &dyn Shell) -> Result<()>;
}

/// Directory layout for one dependency under a host project root.
///
/// ```text
/// <root>/dep/<name>_build/          build root
/// <root>/dep/<name>_build/depot_tools
/// <root>/dep/<name>_build/<name>/   source checkout
/// <root>/dep/<name>/lib             staged binaries
/// <root>/dep/<name>/include         staged headers
/// ```
#[derive(Clone, Debug)]
pub struct Layout {
    root: PathBuf,
    name: String,
}

impl Layout {
    /// `root` is made absolute: steps run with the source checkout as their
    /// working directory, so a relative depot_tools `PATH` entry would dangle.
    pub fn new(root: impl AsRef<Path>, name: &str) -> Result<Self> {
        let root = root.as_ref();
        let root = std::path::absolute(root)
            .with_context(|| format!("Resolving project root {}", root.display()))?;
        Ok(Self {
            root,
            name: name.to_string(),
        })
    }

    pub fn dep_dir(&self) -> PathBuf {
        self.root.join("dep")
    }

    pub fn build_root(&self) -> PathBuf {
        self.dep_dir().join(format!("{}_build", self.name))
    }

    pub fn toolchain_dir(&self) -> PathBuf {
        self.build_root().join(toolchain::DIR_NAME)
    }

    pub fn source_dir(&self) -> PathBuf {
        self.build_root().join(&self.name)
    }

    pub fn build_output_dir(&self) -> PathBuf {
        self.source_dir().join(configure::OUT_DIR)
    }

    pub fn include_src_dir(&self) -> PathBuf {
        self.source_dir().join("include")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dep_dir().join(&self.name)
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.output_dir().join("lib")
    }

    pub fn include_dir(&self) -> PathBuf {
        self.output_dir().join("include")
    }
}

const RULE: &str = "==================================================";

/// Print a framed banner.
pub fn banner(title: &str) {
    println!("{RULE}");
    println!("{title}");
    println!("{RULE}");
}

/// Deploy every registered dependency, in registry order.
pub fn deploy_all(root: &Path, shell: &dyn Shell) -> Result<()> {
    banner("Arc Engine - Deploying all dependencies");
    println!();

    let total = registry::DEPENDENCIES.len();
    for (i, dep) in registry::DEPENDENCIES.iter().enumerate() {
        println!("[{}/{}] Deploying {}...", i + 1, total, dep.name());
        dep.deploy(&Layout::new(root, dep.name())?, shell)?;
    }

    println!();
    banner("✓ All dependencies deployed");
    Ok(())
}

/// Deploy a single dependency by name.
pub fn deploy_one(root: &Path, name: &str, shell: &dyn Shell) -> Result<()> {
    let dep = registry::get(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown dependency: {name} (available: {})",
            registry::names().collect::<Vec<_>>().join(", ")
        )
    })?;
    dep.deploy(&Layout::new(root, dep.name())?, shell)
}
