//! Environment overlay applied to child processes.
//!
//! The deployer never touches its own process environment. Each step gets an
//! explicit [`EnvOverlay`] that is layered onto the inherited environment of
//! the child only.

use super::platform::Platform;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// Search-path prefix plus extra variables for a child process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    platform: Option<Platform>,
    path_prefix: Vec<PathBuf>,
    vars: BTreeMap<String, String>,
}

impl EnvOverlay {
    /// Overlay that leaves the inherited environment untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overlay whose `PATH` entries are joined with `platform`'s separator.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_path_prefix(mut self, dir: impl Into<PathBuf>) -> Self {
        self.path_prefix.push(dir.into());
        self
    }

    #[must_use]
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.path_prefix.is_empty() && self.vars.is_empty()
    }

    #[cfg(test)]
    pub fn path_prefix(&self) -> &[PathBuf] {
        &self.path_prefix
    }

    #[cfg(test)]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// `PATH` value for the child: prefix entries first, then `existing`.
    pub fn search_path(&self, existing: &OsStr) -> OsString {
        let sep = self
            .platform
            .map_or(if cfg!(windows) { ';' } else { ':' }, Platform::path_separator);

        let mut joined = OsString::new();
        for dir in &self.path_prefix {
            joined.push(dir.as_os_str());
            joined.push(sep.to_string());
        }
        joined.push(existing);
        joined
    }

    /// Apply to a command. Overlay keys win over inherited ones.
    pub fn apply_to_command(&self, cmd: &mut Command) {
        if !self.path_prefix.is_empty() {
            let existing = std::env::var_os("PATH").unwrap_or_default();
            cmd.env("PATH", self.search_path(&existing));
        }
        for (key, value) in &self.vars {
            cmd.env(key, value);
        }
    }
}
