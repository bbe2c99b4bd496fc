use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read plugins directory {path}: {source}")]
    PluginsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown plugin: {name}")]
    UnknownPlugin { name: String },

    #[error("plugin {plugin} failed to initialize: {source}")]
    Init {
        plugin: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn plugins_dir(path: &Path, source: std::io::Error) -> Self {
        Self::PluginsDir {
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn unknown_plugin(name: impl Into<String>) -> Self {
        Self::UnknownPlugin { name: name.into() }
    }

    #[must_use]
    pub fn init(plugin: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Init {
            plugin: plugin.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
