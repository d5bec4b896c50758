// src/pipe/mod.rs

//! Pipe orchestrator.
//!
//! One call walks `Validating → Resolving → Splitting → Executing →
//! Classifying → Logged → Done`. Anything rejected before `Executing`
//! returns a [`ValidationError`] and leaves no log entry; everything after
//! that produces exactly one entry, whether the child succeeded, exited
//! non-zero, or could not be run at all.

pub mod input;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::args;
use crate::errors::ValidationError;
use crate::exec::{ProcessBackend, RealProcessBackend};
use crate::exec_log::{self, Clock, ExecutionLog, LogEntry, SystemClock};
use crate::fs::{FileSystem, RealFileSystem};
use crate::resolve::SearchPath;
use crate::types::{CommandSpec, ExecutionRequest, OutcomePayload, ResolvedExecutable};

pub use input::aggregate_input;

/// Orchestrator stages, used for tracing and to locate rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Resolving,
    Splitting,
    Executing,
    Classifying,
    Logged,
    Done,
}

impl Stage {
    /// Stage at which `err` rejected the invocation.
    pub fn of_rejection(err: &ValidationError) -> Stage {
        match err {
            ValidationError::CommandRequired | ValidationError::InvalidCommand(_) => {
                Stage::Validating
            }
            ValidationError::NotRecognized(_) => Stage::Resolving,
            ValidationError::MalformedFlags { .. } => Stage::Splitting,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Result of one executed pipe invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeReport {
    pub command: String,
    pub outcome: OutcomePayload,
    /// Child exit code, or `-1` when no code is available.
    pub exit_code: i32,
    pub elapsed: Duration,
    /// Entries produced by this call, oldest first.
    pub log: Vec<LogEntry>,
    pub failed: bool,
}

impl PipeReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// The entry describing this invocation.
    pub fn log_entry(&self) -> Option<&LogEntry> {
        self.log.last()
    }
}

/// Validate that `name` is a usable command token and return it trimmed.
pub fn validate_command(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::CommandRequired);
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidCommand(name.to_string()));
    }
    Ok(name)
}

/// Coordinates resolution, execution and logging for pipe invocations.
///
/// Holds no per-invocation state, so one orchestrator can serve any number
/// of calls.
pub struct Orchestrator<B> {
    backend: B,
    search_path: SearchPath,
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    timeout: Option<Duration>,
}

impl Orchestrator<RealProcessBackend> {
    /// Real processes, current `PATH`, real filesystem, no timeout.
    pub fn from_env() -> Self {
        Self::new(RealProcessBackend::new())
    }
}

impl<B: ProcessBackend> Orchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            search_path: SearchPath::from_env(),
            fs: Arc::new(RealFileSystem),
            clock: Arc::new(SystemClock),
            timeout: None,
        }
    }

    pub fn with_search_path(mut self, search_path: SearchPath) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve a command name with this orchestrator's search path.
    pub fn resolve(&self, name: &str) -> Option<ResolvedExecutable> {
        self.search_path.resolve_with(self.fs.as_ref(), name)
    }

    /// Run the pre-execution stages and build the request.
    pub fn prepare<S: AsRef<str>>(
        &self,
        spec: &CommandSpec,
        selections: &[S],
        document: &str,
    ) -> Result<ExecutionRequest, ValidationError> {
        debug!(stage = %Stage::Validating, command = %spec.name, "validating command");
        let name = validate_command(&spec.name)?;

        debug!(stage = %Stage::Resolving, command = %name, "resolving command");
        let executable = self
            .resolve(name)
            .ok_or_else(|| ValidationError::NotRecognized(name.to_string()))?;

        debug!(stage = %Stage::Splitting, flags = %spec.flags, "splitting flags");
        let args = args::split(&spec.flags).map_err(|e| ValidationError::MalformedFlags {
            flags: spec.flags.clone(),
            reason: e.to_string(),
        })?;

        Ok(ExecutionRequest {
            executable,
            args,
            input_text: aggregate_input(selections, document),
            timeout: self.timeout,
        })
    }

    /// Pipe the selected text (or the whole document) through `spec`.
    pub async fn pipe<S: AsRef<str>>(
        &self,
        spec: &CommandSpec,
        selections: &[S],
        document: &str,
    ) -> Result<PipeReport, ValidationError> {
        let request = match self.prepare(spec, selections, document) {
            Ok(request) => request,
            Err(err) => {
                warn!(
                    command = %spec.name,
                    stage = %Stage::of_rejection(&err),
                    error = %err,
                    "pipe invocation rejected"
                );
                return Err(err);
            }
        };
        let command = spec.name.trim().to_string();

        debug!(stage = %Stage::Executing, executable = %request.executable, "executing");
        let started = Instant::now();
        let result = self.backend.execute(&request).await;

        debug!(stage = %Stage::Classifying, command = %command, "classifying result");
        let mut log = ExecutionLog::with_clock(Arc::clone(&self.clock));
        let report = match result {
            Ok(result) => {
                log.log(exec_log::executed_message(
                    &command,
                    result.exit_code,
                    result.elapsed,
                ));
                let outcome = OutcomePayload::classify(&result);
                PipeReport {
                    failed: outcome.is_failure(),
                    command,
                    outcome,
                    exit_code: result.exit_code,
                    elapsed: result.elapsed,
                    log: Vec::new(),
                }
            }
            Err(err) => {
                let elapsed = err.elapsed().unwrap_or_else(|| started.elapsed());
                error!(command = %command, error = %err, "pipe execution error");
                log.log(exec_log::failed_message(&command, elapsed, &err));
                PipeReport {
                    outcome: OutcomePayload::Failure {
                        text: err.to_string(),
                    },
                    exit_code: err.exit_code().unwrap_or(-1),
                    elapsed,
                    command,
                    log: Vec::new(),
                    failed: true,
                }
            }
        };
        debug!(stage = %Stage::Logged, entries = log.len(), "invocation logged");

        let report = PipeReport {
            log: log.into_entries(),
            ..report
        };
        debug!(stage = %Stage::Done, failed = report.failed, "pipe finished");
        Ok(report)
    }
}

/// Pipe with real processes and the current `PATH`.
pub async fn pipe<S: AsRef<str>>(
    command: &str,
    flags: &str,
    selections: &[S],
    document: &str,
) -> Result<PipeReport, ValidationError> {
    Orchestrator::from_env()
        .pipe(&CommandSpec::new(command, flags), selections, document)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use crate::errors::RunError;
    use crate::exec::ExecuteFuture;
    use crate::fs::mock::MockFileSystem;
    use crate::types::ExecutionResult;

    /// Replies with a fixed exit code, echoing stdin to stdout.
    #[derive(Default)]
    struct EchoBackend {
        exit_code: i32,
        requests: Mutex<Vec<ExecutionRequest>>,
    }

    impl ProcessBackend for EchoBackend {
        fn execute<'a>(&'a self, request: &'a ExecutionRequest) -> ExecuteFuture<'a> {
            self.requests.lock().unwrap().push(request.clone());
            let result = ExecutionResult {
                exit_code: self.exit_code,
                stdout: request.input_text.clone(),
                stderr: format!("stderr of {}", request.executable),
                elapsed: Duration::from_millis(7),
            };
            Box::pin(async move { Ok(result) })
        }
    }

    struct SpawnFails;

    impl ProcessBackend for SpawnFails {
        fn execute<'a>(&'a self, request: &'a ExecutionRequest) -> ExecuteFuture<'a> {
            let program = request.executable.to_string();
            Box::pin(async move {
                Err(RunError::Spawn {
                    program,
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                })
            })
        }
    }

    fn orchestrator<B: ProcessBackend>(backend: B) -> Orchestrator<B> {
        let fs = MockFileSystem::new();
        fs.add_executable("/usr/bin/tr");
        fs.add_executable("/usr/bin/cat");
        Orchestrator::new(backend)
            .with_filesystem(Arc::new(fs))
            .with_search_path(SearchPath::new(vec![PathBuf::from("/usr/bin")], "/"))
    }

    fn spec(name: &str, flags: &str) -> CommandSpec {
        CommandSpec::new(name, flags)
    }

    #[test]
    fn validate_command_rejects_empty_and_multi_token() {
        assert_eq!(validate_command("  "), Err(ValidationError::CommandRequired));
        assert_eq!(
            validate_command("sort -r"),
            Err(ValidationError::InvalidCommand("sort -r".into()))
        );
        assert_eq!(validate_command(" tr "), Ok("tr"));
    }

    #[test]
    fn rejection_stages() {
        assert_eq!(
            Stage::of_rejection(&ValidationError::CommandRequired),
            Stage::Validating
        );
        assert_eq!(
            Stage::of_rejection(&ValidationError::NotRecognized("x".into())),
            Stage::Resolving
        );
    }

    #[tokio::test]
    async fn unknown_command_is_rejected_without_execution() {
        let orch = orchestrator(EchoBackend::default());

        let err = orch
            .pipe(&spec("doesnotexist123", "-x"), &["text"], "")
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::NotRecognized("doesnotexist123".into()));
        assert!(orch.backend().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_flags_are_rejected_without_execution() {
        let orch = orchestrator(EchoBackend::default());

        let err = orch
            .pipe(&spec("tr", "'a-z"), &["text"], "")
            .await
            .unwrap_err();

        assert!(matches!(err, ValidationError::MalformedFlags { .. }));
        assert!(orch.backend().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn request_carries_resolved_path_args_and_input() {
        let orch = orchestrator(EchoBackend::default()).with_timeout(Some(Duration::from_secs(2)));

        orch.pipe(&spec("tr", "a-z A-Z"), &["hello", "world"], "doc")
            .await
            .unwrap();

        let requests = orch.backend().requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.executable.path(), std::path::Path::new("/usr/bin/tr"));
        assert_eq!(req.args, vec!["a-z", "A-Z"]);
        assert_eq!(req.input_text, "hello world");
        assert_eq!(req.timeout, Some(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn zero_exit_reports_stdout_and_one_log_entry() {
        let orch = orchestrator(EchoBackend::default());

        let report = orch.pipe(&spec("cat", ""), &["hello"], "").await.unwrap();

        assert_eq!(report.outcome, OutcomePayload::Success { text: "hello".into() });
        assert!(!report.failed);
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.log.len(), 1);
        assert_eq!(
            report.log_entry().unwrap().message,
            r#"command "cat" executed with return code 0 in 7.000ms"#
        );
        assert!((report.elapsed_ms() - 7.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn nonzero_exit_reports_stderr_and_flags_failure() {
        let orch = orchestrator(EchoBackend {
            exit_code: 2,
            ..Default::default()
        });

        let report = orch.pipe(&spec("cat", ""), &["hello"], "").await.unwrap();

        assert_eq!(
            report.outcome,
            OutcomePayload::Failure {
                text: "stderr of /usr/bin/cat".into()
            }
        );
        assert!(report.failed);
        assert_eq!(report.exit_code, 2);
    }

    #[tokio::test]
    async fn spawn_failure_is_logged_failure_not_error() {
        let orch = orchestrator(SpawnFails);

        let report = orch.pipe(&spec("tr", ""), &["x"], "").await.unwrap();

        assert!(report.failed);
        assert_eq!(report.exit_code, -1);
        assert!(report.outcome.text().contains("failed to spawn /usr/bin/tr"));
        let entry = report.log_entry().unwrap();
        assert!(entry.message.starts_with(r#"command "tr" failed after "#));
    }

    #[tokio::test]
    async fn repeated_calls_have_independent_logs() {
        let orch = orchestrator(EchoBackend::default());

        let first = orch.pipe(&spec("cat", ""), &["hello"], "").await.unwrap();
        let second = orch.pipe(&spec("cat", ""), &["hello"], "").await.unwrap();

        assert_eq!(first.log.len(), 1);
        assert_eq!(second.log.len(), 1);
        assert_eq!(first.outcome, second.outcome);
    }
}
