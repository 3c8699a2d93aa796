//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for gather-export
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub wiki: WikiSettings,
    pub output: OutputConfig,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikiSettings {
    /// Wiki used when `--domain` is not given
    pub default_domain: String,
    /// Override for `https://{domain}/w/api.php`
    pub api_url: Option<String>,
    /// Items per request (1..=500)
    pub page_size: u32,
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            default_domain: "en.wikipedia.org".to_string(),
            api_url: None,
            page_size: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_dir: PathBuf,
    pub archive_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("."),
            archive_name: gather_export::ARCHIVE_NAME.to_string(),
        }
    }
}

/// Timeouts in seconds
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub connect_timeout: u64,
    pub request_timeout: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: 30,
            request_timeout: 60,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./gather-export.toml (current directory)
    /// 2. ~/.config/gather-export/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("gather-export.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "gather-export") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Connection settings for one wiki, honoring the `api_url` override
    pub fn wiki_config(&self, domain: &str) -> gather_wiki::Config {
        let mut config = gather_wiki::Config::new(domain);
        if let Some(url) = &self.wiki.api_url {
            config.endpoint = config.endpoint.with_api_url(url.clone());
        }
        config.page_size = self.wiki.page_size;
        config
    }
}
