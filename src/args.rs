// src/args.rs

//! Flags string → argument vector.
//!
//! Tokens are handed to the child as discrete arguments; no shell ever sees
//! them, so `$VAR`, globs and `|` are passed through literally.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SplitError(String);

/// Split `flags` with POSIX shell quoting rules.
pub fn split(flags: &str) -> Result<Vec<String>, SplitError> {
    shell_words::split(flags).map_err(|e| SplitError(e.to_string()))
}
