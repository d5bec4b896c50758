// src/exec/mod.rs

//! Process execution layer.
//!
//! This module actually runs the resolved command using
//! `tokio::process::Command` and hands the captured output back to the
//! orchestrator.
//!
//! - [`runner`] spawns one child, feeds stdin, waits and decodes output.
//! - [`backend`] provides the `ProcessBackend` trait and the concrete
//!   `RealProcessBackend` used in production, which tests can replace with a
//!   fake implementation.

pub mod backend;
pub mod runner;

pub use backend::{ExecuteFuture, ProcessBackend, RealProcessBackend};
pub use runner::run;
