use std::path::Path;

use {anyhow::Result, clap::Subcommand};

use superbot_config::{Severity, ValidationResult, unknown_keys, validate};

#[derive(Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors/warnings.
    Check,
    /// Print the effective configuration as JSON.
    Show,
}

pub fn handle_config(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Check => check(explicit),
        ConfigAction::Show => {
            let config = crate::load_config(explicit)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        },
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn check(explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(superbot_config::find_config_file);

    let mut result = ValidationResult::default();
    match &path {
        Some(path) => {
            eprintln!("Checking {}\n", path.display());
            let raw = superbot_config::load_config_value(path)?;
            result.diagnostics.extend(unknown_keys(&raw).diagnostics);
            let config = superbot_config::load_config(path)?;
            result.diagnostics.extend(validate(&config).diagnostics);
        },
        None => {
            eprintln!("No config file found; checking defaults.\n");
            result = validate(&superbot_config::BotConfig::default());
        },
    }

    for d in &result.diagnostics {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        eprintln!("  {BOLD}{color}{}{RESET} {}: {}", d.severity, d.path, d.message);
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if !result.diagnostics.is_empty() {
        eprintln!();
    }

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}
