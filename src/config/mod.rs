// src/config/mod.rs

//! Configuration loading and validation for pipevim.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate values such as the prompt's initial command and the timeout
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_optional};
pub use model::{ConfigFile, PipeSection, RawConfigFile, RawPipeSection};
pub use validate::{parse_duration, parse_timeout};
