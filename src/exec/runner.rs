// src/exec/runner.rs

//! Single-shot process runner.

use std::io::{self, ErrorKind};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{RunError, Stream};
use crate::types::{ExecutionRequest, ExecutionResult};

/// Spawn `request.executable` directly (no shell), feed it `input_text` on
/// stdin and collect everything it prints.
///
/// Elapsed time covers spawn through confirmed exit and is measured with a
/// monotonic clock. With `timeout` unset this waits for as long as the child
/// runs.
pub async fn run(request: &ExecutionRequest) -> Result<ExecutionResult, RunError> {
    let program = request.executable.path();
    info!(
        program = %program.display(),
        args = ?request.args,
        input_bytes = request.input_text.len(),
        "starting child process"
    );

    let mut cmd = Command::new(program);
    cmd.args(&request.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started = Instant::now();
    let mut child = cmd.spawn().map_err(|source| RunError::Spawn {
        program: program.display().to_string(),
        source,
    })?;

    // Write stdin on its own task so a child that fills its stdout pipe
    // before draining stdin cannot deadlock us.
    let stdin = child.stdin.take();
    let input = request.input_text.clone();
    let writer = tokio::spawn(async move {
        let Some(mut stdin) = stdin else {
            return Ok(());
        };
        stdin.write_all(input.as_bytes()).await?;
        stdin.shutdown().await?;
        Ok::<(), std::io::Error>(())
    });

    let output = match request.timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(res) => res.map_err(RunError::Wait)?,
            Err(_) => {
                writer.abort();
                return Err(RunError::TimedOut(limit));
            }
        },
        None => child.wait_with_output().await.map_err(RunError::Wait)?,
    };
    let elapsed = started.elapsed();

    let stdin_complete = note_stdin_outcome(
        writer
            .await
            .unwrap_or_else(|join_err| Err(io::Error::other(join_err))),
    );

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = decode(output.stdout, Stream::Stdout, exit_code, elapsed)?;
    let stderr = decode(output.stderr, Stream::Stderr, exit_code, elapsed)?;

    let result = ExecutionResult {
        exit_code,
        stdout,
        stderr,
        elapsed,
    };
    info!(
        program = %program.display(),
        exit_code,
        success = result.success(),
        stdin_complete,
        elapsed_secs = result.elapsed_seconds(),
        "child process exited"
    );
    Ok(result)
}

/// Log how delivering stdin went and return whether all of it was written.
/// The exit status still decides the outcome.
fn note_stdin_outcome(outcome: io::Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("child exited before reading all of stdin");
            false
        }
        Err(e) => {
            warn!(error = %e, "writing stdin failed; classifying by exit status");
            false
        }
    }
}

fn decode(
    bytes: Vec<u8>,
    stream: Stream,
    exit_code: i32,
    elapsed: Duration,
) -> Result<String, RunError> {
    String::from_utf8(bytes).map_err(|source| RunError::Decode {
        stream,
        exit_code,
        elapsed,
        source,
    })
}
