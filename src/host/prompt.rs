// src/host/prompt.rs

//! Line-based command prompt.
//!
//! Mirrors an editor input panel: the command line shows the resolved
//! executable as a preview and is re-asked until it names something on the
//! search path; the flags line previews the full invocation.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

use super::{command_preview, flags_preview, CommandPrompt};
use crate::exec::ProcessBackend;
use crate::pipe::Orchestrator;

pub struct TerminalPrompt<'a, R, W, B> {
    input: R,
    output: W,
    orchestrator: &'a Orchestrator<B>,
}

impl<'a, R, W, B> TerminalPrompt<'a, R, W, B>
where
    R: BufRead,
    W: Write,
    B: ProcessBackend,
{
    pub fn new(input: R, output: W, orchestrator: &'a Orchestrator<B>) -> Self {
        Self {
            input,
            output,
            orchestrator,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line without its terminator; `None` on EOF.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("reading prompt input")?;
        if n == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R, W, B> CommandPrompt for TerminalPrompt<'_, R, W, B>
where
    R: BufRead,
    W: Write,
    B: ProcessBackend,
{
    fn prompt_for_command(&mut self, initial: &str) -> Result<String> {
        loop {
            write!(self.output, "Command [{initial}]: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                bail!("no command entered");
            };
            let command = match line.trim() {
                "" => initial.to_string(),
                typed => typed.to_string(),
            };

            writeln!(self.output, "{}", command_preview(self.orchestrator, &command))?;
            if self.orchestrator.resolve(&command).is_some() {
                return Ok(command);
            }
            writeln!(self.output, "command not recognized: {command}")?;
        }
    }

    fn prompt_for_flags(&mut self, command: &str) -> Result<String> {
        write!(self.output, "Flags: ")?;
        self.output.flush()?;

        let flags = self.read_line()?.unwrap_or_default();
        writeln!(self.output, "{}", flags_preview(command, &flags))?;
        Ok(flags)
    }
}
