//! Configuration validation.
//!
//! Checks a loaded [`BotConfig`] for settings that parse fine but cannot
//! work as intended, and a raw config value for unknown keys.

use std::{collections::HashSet, fmt};

use crate::schema::BotConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "plugins.2.name"
    pub path: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path: path.into(),
            message: message.into(),
        });
    }
}

const KNOWN_KEYS: &[&str] = &[
    "plugins_path",
    "pluginsPath",
    "plugins",
    "enable_pipe",
    "enablePipe",
    "pipe_delimiter",
    "pipeDelimeter",
    "pipeDelimiter",
];

const KNOWN_PLUGIN_KEYS: &[&str] = &["name", "disabled"];

/// Validate a parsed configuration.
pub fn validate(config: &BotConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if config.pipe_delimiter.is_empty() {
        result.push(
            Severity::Error,
            "pipe_delimiter",
            "delimiter must not be empty",
        );
    } else if config.pipe_delimiter.chars().any(char::is_whitespace) {
        result.push(
            Severity::Warning,
            "pipe_delimiter",
            "delimiter contains whitespace and is matched with surrounding spaces",
        );
    }

    if let Some(plugins) = &config.plugins {
        if config.plugins_path.is_none() {
            result.push(
                Severity::Warning,
                "plugins",
                "plugin list is ignored without plugins_path",
            );
        }
        let mut seen = HashSet::new();
        for (i, entry) in plugins.iter().enumerate() {
            if entry.name.trim().is_empty() {
                result.push(Severity::Error, format!("plugins.{i}.name"), "empty plugin name");
            } else if !seen.insert(entry.name.as_str()) {
                result.push(
                    Severity::Warning,
                    format!("plugins.{i}.name"),
                    format!("plugin \"{}\" is listed more than once", entry.name),
                );
            }
        }
    }

    result
}

/// Report keys in a raw config value that the schema does not know.
pub fn unknown_keys(raw: &serde_json::Value) -> ValidationResult {
    let mut result = ValidationResult::default();
    let Some(root) = raw.as_object() else {
        result.push(Severity::Error, "", "config root must be a table");
        return result;
    };

    for (key, value) in root {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            result.push(Severity::Warning, key.clone(), "unknown field");
            continue;
        }
        if key == "plugins"
            && let Some(entries) = value.as_array()
        {
            for (i, entry) in entries.iter().enumerate() {
                for field in entry.as_object().into_iter().flat_map(|o| o.keys()) {
                    if !KNOWN_PLUGIN_KEYS.contains(&field.as_str()) {
                        result.push(
                            Severity::Warning,
                            format!("plugins.{i}.{field}"),
                            "unknown field",
                        );
                    }
                }
            }
        }
    }

    result
}
