// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [pipe]
/// initial_command = "echo"
/// default_flags = ""
/// timeout = "30s"
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub pipe: RawPipeSection,
}

/// `[pipe]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPipeSection {
    /// Text pre-filled in the command prompt.
    #[serde(default = "default_initial_command")]
    pub initial_command: String,

    /// Flags used when none are given on the command line.
    #[serde(default)]
    pub default_flags: String,

    /// Duration string (e.g. `"30s"`, `"500ms"`). Unset means wait forever.
    #[serde(default)]
    pub timeout: Option<String>,
}

fn default_initial_command() -> String {
    "echo".to_string()
}

impl Default for RawPipeSection {
    fn default() -> Self {
        Self {
            initial_command: default_initial_command(),
            default_flags: String::new(),
            timeout: None,
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub pipe: PipeSection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeSection {
    pub initial_command: String,
    pub default_flags: String,
    pub timeout: Option<Duration>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            pipe: PipeSection {
                initial_command: default_initial_command(),
                default_flags: String::new(),
                timeout: None,
            },
        }
    }
}
