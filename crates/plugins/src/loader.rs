//! Config-driven plugin loading.
//!
//! A plugin that is unknown or fails to initialize is logged and skipped;
//! loading always continues with the next one.

use std::path::Path;

use {
    superbot_config::BotConfig,
    superbot_dispatch::{Bot, DispatcherBuilder},
    tracing::{info, warn},
};

use crate::{
    catalog::PluginCatalog,
    error::{Error, Result},
};

/// A plugin that was requested but not loaded.
#[derive(Debug)]
pub struct SkippedPlugin {
    pub name: String,
    pub reason: Error,
}

/// Outcome of a loading pass.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub skipped: Vec<SkippedPlugin>,
}

impl LoadReport {
    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Set up a bot: built-in commands, configured plugins, then freeze.
pub fn start(config: &BotConfig, catalog: &PluginCatalog) -> (Bot, LoadReport) {
    let mut builder = DispatcherBuilder::new();
    let report = load_plugins(&mut builder, config, catalog);
    info!(
        loaded = report.loaded.len(),
        skipped = report.skipped.len(),
        pipe = config.enable_pipe,
        "bot started"
    );
    (Bot::new(builder.build(), config), report)
}

/// Install the plugins the config asks for into `builder`.
///
/// Nothing is loaded unless `plugins_path` is set. With an explicit
/// `plugins` list, enabled entries load in list order; otherwise every file
/// in `plugins_path` is a request, in file-name order.
pub fn load_plugins(
    builder: &mut DispatcherBuilder,
    config: &BotConfig,
    catalog: &PluginCatalog,
) -> LoadReport {
    let mut report = LoadReport::default();
    let Some(path) = &config.plugins_path else {
        return report;
    };

    let requests = match &config.plugins {
        Some(entries) => {
            info!(path = %path.display(), "loading plugins from list");
            entries
                .iter()
                .filter(|entry| {
                    if entry.disabled {
                        info!(plugin = %entry.name, "plugin disabled, skipping");
                    }
                    !entry.disabled
                })
                .map(|entry| entry.name.clone())
                .collect()
        },
        None => {
            info!(path = %path.display(), "loading all plugins from path");
            match discover(path) {
                Ok(names) => names,
                Err(e) => {
                    warn!(error = %e, "plugin discovery failed");
                    return report;
                },
            }
        },
    };

    for name in requests {
        info!(plugin = %name, "loading plugin");
        match load_one(builder, catalog, &name) {
            Ok(()) => {
                info!(plugin = %name, "plugin loaded");
                report.loaded.push(name);
            },
            Err(reason) => {
                warn!(plugin = %name, error = %reason, "plugin skipped");
                report.skipped.push(SkippedPlugin { name, reason });
            },
        }
    }

    report
}

fn load_one(builder: &mut DispatcherBuilder, catalog: &PluginCatalog, name: &str) -> Result<()> {
    let plugin = catalog
        .get(name)
        .ok_or_else(|| Error::unknown_plugin(name))?;
    builder
        .install(plugin.as_ref())
        .map_err(|e| Error::init(name, e))
}

/// Plugin names requested by the files in `dir`: file stems, sorted by
/// file name. Directories and dot-files are ignored.
pub fn discover(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::plugins_dir(dir, e))?;

    let mut files: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with('.'))
        })
        .collect();
    files.sort();

    Ok(files
        .iter()
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
        .map(str::to_owned)
        .collect())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use {
        superbot_common::Message,
        superbot_config::PluginEntry,
        superbot_dispatch::{Plugin, handler_fn},
    };

    use super::*;

    struct Failing;

    impl Plugin for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn init(&self, _bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
            anyhow::bail!("missing api key")
        }
    }

    struct Clashing;

    impl Plugin for Clashing {
        fn name(&self) -> &str {
            "clashing"
        }

        fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()> {
            bot.command("ECHO", handler_fn(|_, _| async { Ok(()) }))?;
            Ok(())
        }
    }

    fn catalog() -> PluginCatalog {
        let mut catalog = PluginCatalog::with_bundled();
        catalog.register(Arc::new(Failing));
        catalog.register(Arc::new(Clashing));
        catalog
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn nothing_loads_without_plugins_path() {
        let config = BotConfig {
            plugins: Some(vec![PluginEntry::enabled("echo")]),
            ..BotConfig::default()
        };
        let mut builder = DispatcherBuilder::new();
        let report = load_plugins(&mut builder, &config, &catalog());
        assert!(report.loaded.is_empty());
        assert_eq!(builder.commands().len(), 1);
    }

    #[test]
    fn explicit_list_loads_in_order_and_skips_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig {
            plugins_path: Some(dir.path().to_path_buf()),
            plugins: Some(vec![
                PluginEntry::enabled("upper"),
                PluginEntry {
                    name: "reverse".into(),
                    disabled: true,
                },
                PluginEntry::enabled("echo"),
            ]),
            ..BotConfig::default()
        };
        let mut builder = DispatcherBuilder::new();
        let report = load_plugins(&mut builder, &config, &catalog());
        assert_eq!(report.loaded, vec!["upper", "echo"]);
        assert!(report.skipped.is_empty());
        assert_eq!(
            builder.commands().names().collect::<Vec<_>>(),
            vec!["all", "upper", "echo"]
        );
    }

    #[test]
    fn failures_are_skipped_and_loading_continues() {
        let dir = tempfile::tempdir().unwrap();
        let config = BotConfig {
            plugins_path: Some(dir.path().to_path_buf()),
            plugins: Some(vec![
                PluginEntry::enabled("echo"),
                PluginEntry::enabled("failing"),
                PluginEntry::enabled("clashing"),
                PluginEntry::enabled("missing"),
                PluginEntry::enabled("upper"),
            ]),
            ..BotConfig::default()
        };
        let mut builder = DispatcherBuilder::new();
        let report = load_plugins(&mut builder, &config, &catalog());

        assert_eq!(report.loaded, vec!["echo", "upper"]);
        assert_eq!(report.skipped_names(), vec!["failing", "clashing", "missing"]);
        assert!(matches!(report.skipped[0].reason, Error::Init { .. }));
        assert!(matches!(report.skipped[2].reason, Error::UnknownPlugin { .. }));
        assert!(
            report.skipped[1]
                .reason
                .to_string()
                .contains("command already registered: echo")
        );
    }

    #[test]
    fn discovers_every_file_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "upper.js");
        touch(dir.path(), "echo.toml");
        touch(dir.path(), ".hidden");
        std::fs::create_dir(dir.path().join("reverse")).unwrap();

        assert_eq!(discover(dir.path()).unwrap(), vec!["echo", "upper"]);

        let config = BotConfig {
            plugins_path: Some(dir.path().to_path_buf()),
            ..BotConfig::default()
        };
        let mut builder = DispatcherBuilder::new();
        let report = load_plugins(&mut builder, &config, &catalog());
        assert_eq!(report.loaded, vec!["echo", "upper"]);
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let config = BotConfig {
            plugins_path: Some("/nonexistent/superbot/plugins".into()),
            ..BotConfig::default()
        };
        let mut builder = DispatcherBuilder::new();
        let report = load_plugins(&mut builder, &config, &catalog());
        assert!(report.loaded.is_empty());
        assert!(matches!(
            discover(Path::new("/nonexistent/superbot/plugins")),
            Err(Error::PluginsDir { .. })
        ));
    }

    #[tokio::test]
    async fn start_serves_loaded_plugins_with_pipe() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "echo.js");
        touch(dir.path(), "upper.js");
        let config = BotConfig {
            plugins_path: Some(dir.path().to_path_buf()),
            enable_pipe: true,
            ..BotConfig::default()
        };

        let (bot, report) = start(&config, &catalog());
        assert_eq!(report.loaded.len(), 2);

        let reply = bot.receive(Message::new("echo hi | upper")).await.unwrap();
        assert_eq!(reply.text, "HI");
        let reply = bot.receive(Message::new("all")).await.unwrap();
        assert_eq!(reply.text, "all, echo, upper");
    }
}
