// src/lib.rs

pub mod args;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod exec_log;
pub mod fs;
pub mod host;
pub mod logging;
pub mod pipe;
pub mod resolve;
pub mod types;

use std::io::{Read, Write};

use anyhow::Context;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_optional, parse_timeout, ConfigFile};
use crate::errors::{PipevimError, Result, ValidationError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::host::{BufferHost, CommandPrompt, TerminalPrompt, command_preview, flags_preview};
use crate::pipe::{Orchestrator, PipeReport};
use crate::types::CommandSpec;

pub use crate::pipe::pipe;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - document / selection input
/// - optional interactive prompting
/// - the pipe orchestrator
/// - result output
///
/// Returns the process exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_optional(args.config.as_deref())?;
    let orchestrator = Orchestrator::from_env().with_timeout(effective_timeout(&args, &cfg)?);
    let fs = RealFileSystem;

    if args.preview {
        let command = args.command.as_deref().ok_or(ValidationError::CommandRequired)?;
        let flags = args.flags.as_deref().unwrap_or(&cfg.pipe.default_flags);
        println!("{}", command_preview(&orchestrator, command));
        println!("{}", flags_preview(command, flags));
        debug!("preview complete (no execution)");
        return Ok(0);
    }

    let document = match &args.input {
        Some(path) => fs.read_to_string(path)?,
        None => {
            if args.command.is_none() {
                // stdin carries the document, so there is nothing to prompt on.
                return Err(ValidationError::CommandRequired.into());
            }
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading document from stdin")?;
            text
        }
    };

    let spec = match &args.command {
        Some(command) => CommandSpec::new(
            command.clone(),
            args.flags.clone().unwrap_or_else(|| cfg.pipe.default_flags.clone()),
        ),
        None => {
            let stdin = std::io::stdin();
            let mut prompt = TerminalPrompt::new(stdin.lock(), std::io::stderr(), &orchestrator);
            let command = prompt.prompt_for_command(&cfg.pipe.initial_command)?;
            let flags = match &args.flags {
                Some(flags) => flags.clone(),
                None => prompt.prompt_for_flags(&command)?,
            };
            CommandSpec::new(command, flags)
        }
    };

    let mut buffer = BufferHost::new(document).with_selections(args.selections.clone());
    let report = host::pipe_in_host(&mut buffer, &orchestrator, &spec).await?;
    info!(
        command = %report.command,
        exit_code = report.exit_code,
        failed = report.failed,
        "pipe complete"
    );

    if let Some(scratch) = buffer.last_scratch() {
        match &args.output {
            Some(path) => fs.write(path, scratch.text.as_bytes())?,
            None if scratch.is_error => write_all(&mut std::io::stderr(), &scratch.text)?,
            None => write_all(&mut std::io::stdout(), &scratch.text)?,
        }
    }

    if args.show_log {
        for entry in &report.log {
            eprintln!("{entry}");
        }
    }

    Ok(exit_code_for(&report))
}

/// `--timeout` wins over `[pipe].timeout`.
fn effective_timeout(args: &CliArgs, cfg: &ConfigFile) -> Result<Option<std::time::Duration>> {
    match args.timeout.as_deref() {
        Some(s) => parse_timeout(s)
            .map(Some)
            .map_err(|e| PipevimError::ConfigError(format!("--timeout: {e}"))),
        None => Ok(cfg.pipe.timeout),
    }
}

/// Map a report onto a process exit code.
///
/// 0 on success, the child's own code on a non-zero exit, 1 when the child
/// could not be run or was killed by a signal.
pub fn exit_code_for(report: &PipeReport) -> i32 {
    if !report.failed {
        0
    } else if report.exit_code > 0 {
        report.exit_code
    } else {
        1
    }
}

fn write_all(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutcomePayload;
    use std::time::Duration;

    fn report(exit_code: i32, failed: bool) -> PipeReport {
        PipeReport {
            command: "x".into(),
            outcome: OutcomePayload::Success { text: String::new() },
            exit_code,
            elapsed: Duration::ZERO,
            log: Vec::new(),
            failed,
        }
    }

    #[test]
    fn exit_codes_follow_the_report() {
        assert_eq!(exit_code_for(&report(0, false)), 0);
        assert_eq!(exit_code_for(&report(3, true)), 3);
        assert_eq!(exit_code_for(&report(-1, true)), 1);
    }

    #[test]
    fn cli_timeout_overrides_config() {
        let args = <CliArgs as clap::Parser>::try_parse_from(["pipevim", "cat", "--timeout", "2s"])
            .unwrap();
        let cfg = ConfigFile::default();
        assert_eq!(
            effective_timeout(&args, &cfg).unwrap(),
            Some(Duration::from_secs(2))
        );

        let args = <CliArgs as clap::Parser>::try_parse_from(["pipevim", "cat"]).unwrap();
        assert_eq!(effective_timeout(&args, &cfg).unwrap(), None);

        let args = <CliArgs as clap::Parser>::try_parse_from(["pipevim", "cat", "--timeout", "0s"])
            .unwrap();
        let err = effective_timeout(&args, &cfg).unwrap_err();
        assert!(matches!(err, PipevimError::ConfigError(msg) if msg.contains("greater than zero")));
    }
}
