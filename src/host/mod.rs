// src/host/mod.rs

//! Editor-side collaborators.
//!
//! The pipe core never talks to an editor directly. It reads text through an
//! [`EditorHost`], optionally asks for the command through a
//! [`CommandPrompt`], and hands the outcome back via
//! [`EditorHost::present_result`].
//!
//! - [`buffer`] is an in-memory host used by the CLI and tests.
//! - [`prompt`] is a line-based prompt with live previews.

pub mod buffer;
pub mod prompt;

use anyhow::Result;

use crate::errors::PipevimError;
use crate::exec::ProcessBackend;
use crate::pipe::{Orchestrator, PipeReport};
use crate::types::CommandSpec;

pub use buffer::{BufferHost, ScratchBuffer};
pub use prompt::TerminalPrompt;

/// What the pipe needs from the editor.
pub trait EditorHost {
    /// Text of each selected region in document order. Empty means no
    /// selection.
    fn selections(&self) -> Vec<String>;

    fn document_text(&self) -> String;

    /// Show `text` in a new output surface, styled as an error when
    /// `is_error` is set.
    fn present_result(&mut self, text: &str, is_error: bool) -> Result<()>;
}

/// Interactive collection of the command and its flags.
pub trait CommandPrompt {
    fn prompt_for_command(&mut self, initial: &str) -> Result<String>;
    fn prompt_for_flags(&mut self, command: &str) -> Result<String>;
}

/// Markup-free preview of what a command name resolves to.
pub fn command_preview<B: ProcessBackend>(orchestrator: &Orchestrator<B>, command: &str) -> String {
    match orchestrator.resolve(command.trim()) {
        Some(exe) => format!("Command: {exe}"),
        None => "Command: <not found>".to_string(),
    }
}

/// Preview of the full invocation as the user typed it.
pub fn flags_preview(command: &str, flags: &str) -> String {
    if flags.is_empty() {
        format!("Command: {command}")
    } else {
        format!("Command: {command} {flags}")
    }
}

/// Run `spec` over the host's selection and present the outcome.
///
/// Validation errors are returned (as [`PipevimError::Validation`]) before
/// the host is touched; everything else ends in exactly one
/// `present_result` call.
pub async fn pipe_in_host<H, B>(
    host: &mut H,
    orchestrator: &Orchestrator<B>,
    spec: &CommandSpec,
) -> crate::errors::Result<PipeReport>
where
    H: EditorHost,
    B: ProcessBackend,
{
    let selections = host.selections();
    let document = host.document_text();

    let report = orchestrator
        .pipe(spec, &selections, &document)
        .await
        .map_err(PipevimError::from)?;

    host.present_result(report.outcome.text(), report.failed)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::exec::RealProcessBackend;
    use crate::fs::mock::MockFileSystem;
    use crate::resolve::SearchPath;

    fn orchestrator() -> Orchestrator<RealProcessBackend> {
        let fs = MockFileSystem::new();
        fs.add_executable("/usr/bin/tr");
        Orchestrator::new(RealProcessBackend)
            .with_filesystem(Arc::new(fs))
            .with_search_path(SearchPath::new(vec![PathBuf::from("/usr/bin")], "/"))
    }

    #[test]
    fn command_preview_shows_resolved_path() {
        let orch = orchestrator();
        assert_eq!(command_preview(&orch, "tr"), "Command: /usr/bin/tr");
        assert_eq!(command_preview(&orch, "nope"), "Command: <not found>");
    }

    #[test]
    fn flags_preview_joins_command_and_flags() {
        assert_eq!(flags_preview("tr", "a-z A-Z"), "Command: tr a-z A-Z");
        assert_eq!(flags_preview("sort", ""), "Command: sort");
    }
}
