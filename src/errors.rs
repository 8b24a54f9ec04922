// src/errors.rs

//! Crate-wide error types.
//!
//! [`RunError`] is what the pipeline executor returns: it always carries the
//! original command text, the offending stage when one is known, and a
//! [`RunErrorKind`] naming the phase that failed. [`PipexecError`] wraps it
//! together with configuration and package-manager failures.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipexecError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("command `{0}` did not succeed")]
    CommandUnsuccessful(String),

    #[error("no supported package manager found under /usr/bin")]
    NoPackageManager,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipexecError>;

/// Resolved executable and arguments of the stage an error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInfo {
    pub path: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for StageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path: {} | args: {:?}", self.path.display(), self.args)
    }
}

/// Failure of a single pipeline invocation.
#[derive(Error, Debug)]
#[error("[run] `{command}`{}: {kind}", stage_suffix(.stage))]
pub struct RunError {
    pub command: String,
    pub stage: Option<StageInfo>,
    #[source]
    pub kind: RunErrorKind,
}

fn stage_suffix(stage: &Option<StageInfo>) -> String {
    match stage {
        Some(info) => format!(" ({info})"),
        None => String::new(),
    }
}

impl RunError {
    pub fn new(command: impl Into<String>, kind: RunErrorKind) -> Self {
        Self {
            command: command.into(),
            stage: None,
            kind,
        }
    }

    pub fn with_stage(mut self, stage: StageInfo) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn kind(&self) -> &RunErrorKind {
        &self.kind
    }
}

#[derive(Error, Debug)]
pub enum RunErrorKind {
    #[error("no command around pipe")]
    DanglingPipe,

    #[error("invalid environment assignment `{0}`: the format has to be VAR=value")]
    InvalidEnvAssignment(String),

    #[error("stage has environment assignments but no command")]
    NoCommand,

    #[error("executable `{name}` not found")]
    ExecutableNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("`{0}` needs a command to run")]
    MissingWrappedCommand(String),

    #[error("invalid glob pattern `{pattern}`")]
    GlobSyntax {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("start: {0}")]
    StartFailure(#[source] std::io::Error),

    #[error("wait: {0}")]
    WaitFailure(#[source] std::io::Error),

    #[error("stderr: {0}")]
    StageStderr(String),
}
