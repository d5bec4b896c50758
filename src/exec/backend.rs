// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The orchestrator talks to a `ProcessBackend` instead of spawning directly,
//! so tests can script results without real processes.
//!
//! - `RealProcessBackend` forwards to [`runner::run`](super::runner::run).
//! - Tests can provide their own backend that records requests and replies
//!   with canned `ExecutionResult`s or `RunError`s.

use std::future::Future;
use std::pin::Pin;

use crate::errors::RunError;
use crate::types::{ExecutionRequest, ExecutionResult};

use super::runner;

/// Future returned by [`ProcessBackend::execute`].
pub type ExecuteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ExecutionResult, RunError>> + Send + 'a>>;

/// Trait abstracting how an `ExecutionRequest` is carried out.
pub trait ProcessBackend: Send + Sync {
    /// Run the request to completion, spawning at most one process.
    fn execute<'a>(&'a self, request: &'a ExecutionRequest) -> ExecuteFuture<'a>;
}

/// Backend that spawns real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealProcessBackend;

impl RealProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for RealProcessBackend {
    fn execute<'a>(&'a self, request: &'a ExecutionRequest) -> ExecuteFuture<'a> {
        Box::pin(runner::run(request))
    }
}
