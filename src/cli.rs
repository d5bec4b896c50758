// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pipevim`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pipevim",
    version,
    about = "Pipe text through a command's stdin and show what it prints.",
    long_about = None
)]
pub struct CliArgs {
    /// Executable to run, looked up on PATH.
    ///
    /// If omitted, it is prompted for on stdin (requires `--input`).
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Flags passed to the command, split with shell quoting rules but never
    /// run through a shell.
    #[arg(short, long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub flags: Option<String>,

    /// Read the document from this file instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// A selected region of the document. Repeat for several regions.
    #[arg(long = "select", value_name = "TEXT")]
    pub selections: Vec<String>,

    /// Write the result to this file instead of stdout/stderr.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Kill the command if it runs longer than this (e.g. `500ms`, `10s`).
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Pipevim.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PIPEVIM_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Show what the command resolves to, but don't run it.
    #[arg(long)]
    pub preview: bool,

    /// Print the execution log to stderr after running.
    #[arg(long)]
    pub show_log: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_may_start_with_a_hyphen() {
        let args = CliArgs::try_parse_from(["pipevim", "sort", "-f", "-r -u"]).unwrap();
        assert_eq!(args.command.as_deref(), Some("sort"));
        assert_eq!(args.flags.as_deref(), Some("-r -u"));
    }

    #[test]
    fn selections_repeat() {
        let args =
            CliArgs::try_parse_from(["pipevim", "cat", "--select", "a", "--select", "b"]).unwrap();
        assert_eq!(args.selections, vec!["a", "b"]);
        assert!(args.flags.is_none());
    }

    #[test]
    fn command_is_optional() {
        let args = CliArgs::try_parse_from(["pipevim", "--input", "doc.txt"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.input, Some(PathBuf::from("doc.txt")));
    }
}
