//! External command execution.
//!
//! Every mutation outside the deployer's own file copies goes through a
//! [`Shell`]. Output is never captured: the child inherits the terminal so
//! `\r`-driven progress bars (git, gclient, ninja) redraw in place.

use super::env::EnvOverlay;
use super::error::DeployError;
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Runs shell command lines.
pub trait Shell {
    /// Run `command` in `cwd` (or the current directory) with `overlay`
    /// layered on the inherited environment. A non-zero exit is an error.
    fn run(&self, command: &str, cwd: Option<&Path>, overlay: &EnvOverlay) -> Result<()>;
}

/// The host shell: `sh -c` on unix, `cmd /C` on windows.
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, command: &str, cwd: Option<&Path>, overlay: &EnvOverlay) -> Result<()> {
        println!(">>> {command}");
        std::io::stdout().flush()?;

        let mut cmd = shell_command(command);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        overlay.apply_to_command(&mut cmd);

        let status = cmd.status().map_err(|source| DeployError::Spawn {
            command: command.to_string(),
            source,
        })?;

        if !status.success() {
            match status.code() {
                Some(code) => println!("\nCommand failed with exit code: {code}"),
                None => println!("\nCommand terminated by signal"),
            }
            return Err(DeployError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // cmd.exe does its own quote parsing; pass the line through verbatim.
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").raw_arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(test)]
pub mod testing {
    //! Recording shell for exercising steps without touching the network.

    use super::{DeployError, EnvOverlay, Path, Result, Shell};
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Clone, Debug)]
    pub struct Invocation {
        pub command: String,
        pub cwd: Option<PathBuf>,
        pub overlay: EnvOverlay,
    }

    /// Logs every invocation. Commands starting with a registered prefix can
    /// create a directory (to mimic a clone) or fail with an exit code.
    #[derive(Default)]
    pub struct RecordingShell {
        pub calls: RefCell<Vec<Invocation>>,
        creates: Vec<(String, PathBuf)>,
        failures: Vec<(String, i32)>,
    }

    impl RecordingShell {
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn creating(mut self, prefix: &str, dir: impl Into<PathBuf>) -> Self {
            self.creates.push((prefix.to_string(), dir.into()));
            self
        }

        #[must_use]
        pub fn failing(mut self, prefix: &str, code: i32) -> Self {
            self.failures.push((prefix.to_string(), code));
            self
        }

        pub fn commands(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.command.clone()).collect()
        }

        pub fn count_prefix(&self, prefix: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.command.starts_with(prefix))
                .count()
        }
    }

    impl Shell for RecordingShell {
        fn run(&self, command: &str, cwd: Option<&Path>, overlay: &EnvOverlay) -> Result<()> {
            self.calls.borrow_mut().push(Invocation {
                command: command.to_string(),
                cwd: cwd.map(Path::to_path_buf),
                overlay: overlay.clone(),
            });

            if let Some((_, code)) = self.failures.iter().find(|(p, _)| command.starts_with(p)) {
                return Err(DeployError::CommandFailed {
                    command: command.to_string(),
                    code: Some(*code),
                }
                .into());
            }
            for (prefix, dir) in &self.creates {
                if command.starts_with(prefix.as_str()) {
                    std::fs::create_dir_all(dir)?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::deployer::platform::Platform;

    #[test]
    fn test_success() {
        assert!(SystemShell.run("true", None, &EnvOverlay::empty()).is_ok());
    }

    #[test]
    fn test_nonzero_exit_is_command_failed() {
        let err = SystemShell
            .run("exit 3", None, &EnvOverlay::empty())
            .unwrap_err();
        match err.downcast_ref::<DeployError>() {
            Some(DeployError::CommandFailed { command, code }) => {
                assert_eq!(command, "exit 3");
                assert_eq!(*code, Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_runs_in_cwd_with_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = EnvOverlay::for_platform(Platform::Linux)
            .with_path_prefix(dir.path())
            .with_var("DEPLOYER_MARKER", "overlay");

        SystemShell
            .run(
                "echo \"$DEPLOYER_MARKER\" > marker.txt && echo \"$PATH\" > path.txt",
                Some(dir.path()),
                &overlay,
            )
            .unwrap();

        let marker = std::fs::read_to_string(dir.path().join("marker.txt")).unwrap();
        assert_eq!(marker.trim(), "overlay");
        let path = std::fs::read_to_string(dir.path().join("path.txt")).unwrap();
        assert!(path.starts_with(&format!("{}:", dir.path().display())));
        assert!(std::env::var_os("DEPLOYER_MARKER").is_none());
    }
}
