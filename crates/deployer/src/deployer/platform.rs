//! Host platform and architecture detection.

use super::error::DeployError;
use std::fmt;

/// Operating systems the deployer knows how to build for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Macos,
    Windows,
    Linux,
}

impl Platform {
    /// Map a `uname -s` style system name (`Darwin`, `Windows`, `Linux`).
    pub fn from_system_name(system: &str) -> Result<Self, DeployError> {
        match system {
            "Darwin" => Ok(Self::Macos),
            "Windows" => Ok(Self::Windows),
            "Linux" => Ok(Self::Linux),
            other => Err(DeployError::UnsupportedPlatform {
                system: other.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Macos => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }

    /// Separator between entries of `PATH`.
    pub fn path_separator(self) -> char {
        match self {
            Self::Windows => ';',
            Self::Macos | Self::Linux => ':',
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// CPU architecture. Unknown machines are carried through as a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
    Other(String),
}

impl Arch {
    pub fn from_machine(machine: &str) -> Self {
        let machine = machine.to_lowercase();
        match machine.as_str() {
            "arm64" | "aarch64" => Self::Arm64,
            "x86_64" | "amd64" => Self::X64,
            _ => Self::Other(machine),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved host, computed once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub arch: Arch,
}

impl PlatformInfo {
    pub fn new(system: &str, machine: &str) -> Result<Self, DeployError> {
        Ok(Self {
            platform: Platform::from_system_name(system)?,
            arch: Arch::from_machine(machine),
        })
    }

}

/// CPU identifier of the running host.
pub fn host_machine() -> &'static str {
    std::env::consts::ARCH
}

/// Rust's OS identifier translated to the `uname -s` spelling.
pub fn host_system_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "Darwin",
        "windows" => "Windows",
        "linux" => "Linux",
        other => other,
    }
}
