//! TOML configuration.
//!
//! Lookup order: explicit `--config` path, then `$STOREFRONT_WIDGETS_CONFIG`,
//! then `config.toml` in the platform config directory. A missing default file
//! means defaults; a missing explicit file is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::render::DocumentOptions;
use crate::sources::{DescriptorSource, FileSource, HttpSource};
use crate::widgets::{RawHtmlPolicy, RenderOptions};

pub const CONFIG_ENV: &str = "STOREFRONT_WIDGETS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no descriptor source configured: {0}")]
    MissingSource(&'static str),
    #[error("source.timeout_secs must be at least 1")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File this config was read from, if any.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
    pub source: SourceConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    File,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub root: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::File,
            root: None,
            base_url: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub raw_html: RawHtmlPolicy,
    pub show_unsupported: bool,
    pub parallel: bool,
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            raw_html: RawHtmlPolicy::Trusted,
            show_unsupported: false,
            parallel: true,
            title: "Storefront".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub to_file: bool,
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            raw_html: self.render.raw_html,
        }
    }

    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            title: self.render.title.clone(),
            show_unsupported: self.render.show_unsupported,
        }
    }

    /// Build the configured descriptor source. The HTTP source owns a blocking
    /// client, so call this off the async runtime.
    pub fn build_source(&self) -> Result<Box<dyn DescriptorSource>, anyhow::Error> {
        match self.source.kind {
            SourceKind::File => {
                let root = self
                    .source
                    .root
                    .clone()
                    .ok_or(ConfigError::MissingSource("set source.root or --source-dir"))?;
                Ok(Box::new(FileSource::new(root)))
            }
            SourceKind::Http => {
                let base = self
                    .source
                    .base_url
                    .as_deref()
                    .ok_or(ConfigError::MissingSource("set source.base_url or --source-url"))?;
                if self.source.timeout_secs == 0 {
                    return Err(ConfigError::ZeroTimeout.into());
                }
                let timeout = Duration::from_secs(self.source.timeout_secs);
                Ok(Box::new(HttpSource::new(base, timeout)?))
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "storefront-widgets", "storefront-widgets")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration following the lookup order in the module docs.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let (path, required) = match (explicit, from_env) {
        (Some(p), _) => (p.to_path_buf(), true),
        (None, Some(p)) => (p, true),
        (None, None) => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(Config::default()),
        },
    };

    if !required && !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let mut config = Config::from_toml(&content, &path)?;
    config.loaded_from = Some(path);
    Ok(config)
}
