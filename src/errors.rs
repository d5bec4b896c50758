// src/errors.rs

//! Crate-wide error types.
//!
//! - [`ValidationError`] rejects an invocation before anything is spawned.
//! - [`RunError`] describes a process that could not be run to completion;
//!   the orchestrator turns it into a logged failure outcome.
//! - [`PipevimError`] is what the config/CLI layers return.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Reasons a pipe invocation is rejected before execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("command required")]
    CommandRequired,

    #[error("command must be a single executable name, got {0:?}")]
    InvalidCommand(String),

    #[error("command not recognized: {0}")]
    NotRecognized(String),

    #[error("malformed flags {flags:?}: {reason}")]
    MalformedFlags { flags: String, reason: String },
}

/// Which child output stream a decoding failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Failures of a single process run, distinct from a non-zero exit code.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("{stream} is not valid UTF-8: {source}")]
    Decode {
        stream: Stream,
        exit_code: i32,
        elapsed: Duration,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("process did not exit within {0:?} and was killed")]
    TimedOut(Duration),
}

impl RunError {
    /// Exit code of the child, when it got far enough to report one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::Decode { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }

    /// Elapsed time measured by the runner itself, if it has one.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            RunError::Decode { elapsed, .. } => Some(*elapsed),
            RunError::TimedOut(after) => Some(*after),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum PipevimError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipevimError>;
