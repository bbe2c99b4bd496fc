/// Config schema types for the bot runtime.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Delimiter used to split piped commands when none is configured.
pub const DEFAULT_PIPE_DELIMITER: &str = "|";

/// Root configuration.
///
/// camelCase aliases are accepted so configs written for older bots
/// (`pluginsPath`, `enablePipe`, `pipeDelimeter`) keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Directory plugins are requested from.
    #[serde(alias = "pluginsPath")]
    pub plugins_path: Option<PathBuf>,
    /// Explicit ordered plugin list. When absent, every file in
    /// `plugins_path` is treated as a plugin request.
    pub plugins: Option<Vec<PluginEntry>>,
    /// Split inbound text into piped sub-commands.
    #[serde(alias = "enablePipe")]
    pub enable_pipe: bool,
    /// Pipe token; must be surrounded by single spaces in the message text.
    #[serde(alias = "pipeDelimeter", alias = "pipeDelimiter")]
    pub pipe_delimiter: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            plugins_path: None,
            plugins: None,
            enable_pipe: false,
            pipe_delimiter: DEFAULT_PIPE_DELIMITER.into(),
        }
    }
}

impl BotConfig {
    /// The configured pipe token, or the default when it is empty.
    pub fn effective_delimiter(&self) -> &str {
        if self.pipe_delimiter.is_empty() {
            DEFAULT_PIPE_DELIMITER
        } else {
            &self.pipe_delimiter
        }
    }

    /// The full separator matched in message text, e.g. `" | "`.
    pub fn pipe_separator(&self) -> String {
        format!(" {} ", self.effective_delimiter())
    }
}

/// One entry of the explicit plugin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub name: String,
    #[serde(default)]
    pub disabled: bool,
}

impl PluginEntry {
    pub fn enabled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            disabled: false,
        }
    }
}
