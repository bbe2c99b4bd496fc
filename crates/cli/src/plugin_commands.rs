//! CLI commands for plugin management.

use std::path::Path;

use clap::Subcommand;

use superbot_plugins::{PluginCatalog, loader::discover};

#[derive(Clone, Copy, Subcommand)]
pub enum PluginAction {
    /// List plugins linked into this binary.
    List,
    /// Show which plugins the current config would load.
    Plan,
}

pub fn handle_plugins(action: PluginAction, explicit: Option<&Path>) -> anyhow::Result<()> {
    let catalog = PluginCatalog::with_bundled();

    match action {
        PluginAction::List => {
            for name in catalog.names() {
                println!("  {name}");
            }
        },
        PluginAction::Plan => {
            let config = crate::load_config(explicit)?;
            let Some(path) = &config.plugins_path else {
                println!("plugins_path is not set; no plugins will be loaded.");
                return Ok(());
            };
            let requested: Vec<(String, bool)> = match &config.plugins {
                Some(entries) => entries
                    .iter()
                    .map(|e| (e.name.clone(), !e.disabled))
                    .collect(),
                None => discover(path)?.into_iter().map(|n| (n, true)).collect(),
            };
            for (name, enabled) in requested {
                let status = match (enabled, catalog.get(&name).is_some()) {
                    (false, _) => "disabled",
                    (true, true) => "load",
                    (true, false) => "unknown",
                };
                println!("  {name:<16} {status}");
            }
        },
    }

    Ok(())
}
