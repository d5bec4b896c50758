use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pipevim::errors::RunError;
use pipevim::exec::{ExecuteFuture, ProcessBackend};
use pipevim::types::{ExecutionRequest, ExecutionResult};

/// One canned reply.
pub enum Scripted {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    Fail(RunError),
}

/// A fake backend that:
/// - records every request it was asked to run
/// - replies with scripted results in order, then echoes stdin with exit 0.
#[derive(Clone, Default)]
pub struct FakeBackend {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    executed: Arc<Mutex<Vec<ExecutionRequest>>>,
    elapsed: Duration,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time reported for every completed run.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn then_exit(self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Exit {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        });
        self
    }

    pub fn then_fail(self, err: RunError) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Fail(err));
        self
    }

    /// Shared handle on the recorded requests.
    pub fn executed(&self) -> Arc<Mutex<Vec<ExecutionRequest>>> {
        Arc::clone(&self.executed)
    }
}

impl ProcessBackend for FakeBackend {
    fn execute<'a>(&'a self, request: &'a ExecutionRequest) -> ExecuteFuture<'a> {
        self.executed.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        let elapsed = self.elapsed;

        Box::pin(async move {
            match next {
                Some(Scripted::Exit {
                    code,
                    stdout,
                    stderr,
                }) => Ok(ExecutionResult {
                    exit_code: code,
                    stdout,
                    stderr,
                    elapsed,
                }),
                Some(Scripted::Fail(err)) => Err(err),
                None => Ok(ExecutionResult {
                    exit_code: 0,
                    stdout: request.input_text.clone(),
                    stderr: String::new(),
                    elapsed,
                }),
            }
        })
    }
}
