use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A user-supplied command: an executable name plus a raw flags string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSpec {
    pub name: String,
    pub flags: String,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: flags.into(),
        }
    }
}

/// Absolute path of an executable found on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    path: PathBuf,
}

impl ResolvedExecutable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ResolvedExecutable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Everything the process runner needs for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub executable: ResolvedExecutable,
    pub args: Vec<String>,
    pub input_text: String,
    /// Upper bound on the wait; `None` blocks until the child exits.
    pub timeout: Option<Duration>,
}

/// Captured result of a child process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// What the host should display for an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomePayload {
    Success { text: String },
    Failure { text: String },
}

impl OutcomePayload {
    /// Pick stdout or stderr based on the exit code.
    pub fn classify(result: &ExecutionResult) -> Self {
        if result.success() {
            OutcomePayload::Success {
                text: result.stdout.clone(),
            }
        } else {
            OutcomePayload::Failure {
                text: result.stderr.clone(),
            }
        }
    }

    pub fn text(&self) -> &str {
        match self {
            OutcomePayload::Success { text } | OutcomePayload::Failure { text } => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, OutcomePayload::Failure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(exit_code: i32) -> ExecutionResult {
        ExecutionResult {
            exit_code,
            stdout: "out".into(),
            stderr: "err".into(),
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn zero_exit_selects_stdout() {
        let payload = OutcomePayload::classify(&result(0));
        assert_eq!(payload, OutcomePayload::Success { text: "out".into() });
        assert!(!payload.is_failure());
    }

    #[test]
    fn nonzero_exit_selects_stderr() {
        let payload = OutcomePayload::classify(&result(2));
        assert_eq!(payload, OutcomePayload::Failure { text: "err".into() });
        assert_eq!(payload.text(), "err");
    }

    #[test]
    fn elapsed_seconds_is_derived_from_elapsed() {
        let r = result(0);
        assert!(r.success());
        assert!((r.elapsed_seconds() - 0.005).abs() < 1e-9);
    }

    #[test]
    fn negative_exit_is_failure() {
        assert!(OutcomePayload::classify(&result(-1)).is_failure());
    }
}
