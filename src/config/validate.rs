// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, PipeSection, RawConfigFile, RawPipeSection};
use crate::errors::{PipevimError, Result};
use crate::pipe::validate_command;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PipevimError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        Ok(ConfigFile {
            pipe: validate_pipe_section(raw.pipe)?,
        })
    }
}

fn validate_pipe_section(raw: RawPipeSection) -> Result<PipeSection> {
    let initial_command = validate_command(&raw.initial_command)
        .map_err(|e| {
            PipevimError::ConfigError(format!("[pipe].initial_command is invalid: {e}"))
        })?
        .to_string();

    let timeout = match raw.timeout.as_deref() {
        None => None,
        Some(s) => Some(
            parse_timeout(s)
                .map_err(|e| PipevimError::ConfigError(format!("[pipe].timeout: {e}")))?,
        ),
    };

    Ok(PipeSection {
        initial_command,
        default_flags: raw.default_flags,
        timeout,
    })
}

/// Parse a timeout value. Same syntax as [`parse_duration`], but zero is
/// rejected.
pub fn parse_timeout(s: &str) -> std::result::Result<Duration, String> {
    let d = parse_duration(s)?;
    if d.is_zero() {
        return Err("must be greater than zero".to_string());
    }
    Ok(d)
}

/// Parse `"<number><unit>"` durations with `ms`, `s`, `m` or `h` units.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => scaled_secs(value, 60),
        "h" => scaled_secs(value, 60 * 60),
        other => Err(format!("unknown duration unit '{}'", other)),
    }
}

fn scaled_secs(value: u64, factor: u64) -> std::result::Result<Duration, String> {
    value
        .checked_mul(factor)
        .map(Duration::from_secs)
        .ok_or_else(|| "duration too large".to_string())
}
