//! Configuration loading, validation, and env substitution.
//!
//! Config files: `superbot.toml`, `superbot.yaml`, or `superbot.json`
//! Searched in `./` then `~/.config/superbot/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config, load_config_value},
    schema::{BotConfig, DEFAULT_PIPE_DELIMITER, PluginEntry},
    validate::{Diagnostic, Severity, ValidationResult, unknown_keys, validate},
};
