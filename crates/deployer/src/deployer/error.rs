//! Error taxonomy for the deployment pipeline.
//!
//! Only two things are fatal: an unsupported host and a failing external
//! command. Missing optional artifacts are warnings and never reach here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("unsupported platform: {system}")]
    UnsupportedPlatform { system: String },

    #[error("command failed with exit code {}: {command}", display_code(*.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

impl DeployError {
    /// Process exit status to use when this error ends the run.
    ///
    /// A failing child's own code is propagated untouched.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn display_code(code: Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}

/// Exit status for an arbitrary pipeline error.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<DeployError>()
        .map_or(1, DeployError::exit_code)
}
