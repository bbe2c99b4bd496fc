use std::{collections::HashMap, sync::Arc};

use {superbot_dispatch::Plugin, tracing::warn};

use crate::bundled;

/// Plugins linked into the binary, by name.
#[derive(Default)]
pub struct PluginCatalog {
    plugins: HashMap<String, Arc<dyn Plugin>>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding every bundled plugin.
    pub fn with_bundled() -> Self {
        let mut catalog = Self::new();
        for plugin in bundled::all() {
            catalog.register(plugin);
        }
        catalog
    }

    /// Add a plugin. A later plugin with the same name replaces the earlier one.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        let name = plugin.name().to_string();
        if self.plugins.insert(name.clone(), plugin).is_some() {
            warn!(plugin = %name, "plugin replaced in catalog");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.plugins.get(name)
    }

    /// Plugin names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
