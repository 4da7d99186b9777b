//! # Arc Engine dependency deployer
//!
//! Fetches, builds and stages the RHI's third-party libraries into `dep/`.
//!
//! ## Usage
//!
//! ```bash
//! deployer               # Deploy every dependency
//! deployer --all         # Same as above
//! deployer --angle       # Deploy ANGLE only
//! deployer --list        # List available dependencies
//! ```
//!
//! Re-running resumes: existing checkouts are reused, the build is
//! incremental, and staged files are overwritten.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod deployer;

use deployer::runner::SystemShell;

#[derive(Parser)]
#[command(name = "deployer", about = "Arc Engine RHI dependency deployer")]
#[command(group(clap::ArgGroup::new("target").args(["all", "angle", "list"])))]
struct Cli {
    /// Deploy all dependencies (default)
    #[arg(long)]
    all: bool,

    /// Deploy ANGLE only
    #[arg(long)]
    angle: bool,

    /// List available dependencies
    #[arg(long)]
    list: bool,

    /// Host project root; artifacts go under <ROOT>/dep
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn run(cli: &Cli) -> Result<()> {
    if cli.list {
        deployer::registry::print_list();
        return Ok(());
    }

    if cli.angle {
        return deployer::deploy_one(&cli.root, "angle", &SystemShell);
    }

    deployer::deploy_all(&cli.root, &SystemShell)
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(deployer::error::exit_code_for(&err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_all() {
        let cli = Cli::try_parse_from(["deployer"]).unwrap();
        assert!(!cli.all && !cli.angle && !cli.list);
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn test_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["deployer", "--angle", "--list"]).is_err());
        assert!(Cli::try_parse_from(["deployer", "--angle"]).unwrap().angle);
    }

    #[test]
    fn test_list_deploys_nothing() {
        let cli = Cli::try_parse_from(["deployer", "--list", "--root", "/nonexistent"]).unwrap();
        assert!(run(&cli).is_ok());
        assert!(!std::path::Path::new("/nonexistent/dep").exists());
    }
}
