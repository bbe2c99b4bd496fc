//! Plugin system: a build-time catalog of plugins, config-driven loading,
//! and the plugins bundled with the bot.
//!
//! Plugins are linked statically. The config decides which of them run:
//! either an explicit ordered list, or every file found in `plugins_path`
//! (the file stem names the plugin).

pub mod bundled;
pub mod catalog;
pub mod error;
pub mod loader;

pub use {
    catalog::PluginCatalog,
    error::{Error, Result},
    loader::{LoadReport, SkippedPlugin, load_plugins, start},
};
