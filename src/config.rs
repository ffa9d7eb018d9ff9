use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub tables: TablesConfig,
    pub downloads: DownloadsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub container_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_class: "md-content".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TablesConfig {
    pub id_prefix: String,
    pub csv_file_name: String,
    pub csv_mime: String,
    pub csv_url_ttl_secs: u64,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            id_prefix: "md-table-".to_string(),
            csv_file_name: "table-export.csv".to_string(),
            csv_mime: "text/csv;charset=utf-8".to_string(),
            csv_url_ttl_secs: 10,
        }
    }
}

impl TablesConfig {
    pub fn csv_url_ttl(&self) -> Duration {
        Duration::from_secs(self.csv_url_ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DownloadsConfig {
    pub api_prefix: String,
    pub download_segment: String,
    pub token_key: String,
    pub object_url_ttl_secs: u64,
    pub api_base_url: Option<String>,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api/ekchat/".to_string(),
            download_segment: "/download".to_string(),
            token_key: "accessToken".to_string(),
            object_url_ttl_secs: 60,
            api_base_url: None,
        }
    }
}

impl DownloadsConfig {
    /// Whether a link must be fetched with the bearer token instead of
    /// being followed.
    pub fn is_authenticated_download(&self, href: &str) -> bool {
        href.contains(&self.api_prefix) && href.contains(&self.download_segment)
    }

    pub fn object_url_ttl(&self) -> Duration {
        Duration::from_secs(self.object_url_ttl_secs)
    }
}

impl Config {
    /// The defaults shipped in `default_config.toml`.
    pub fn compiled_default() -> Self {
        match toml::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "bundled default config is invalid");
                Self::default()
            }
        }
    }

    /// Load config from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return defaults if it is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::compiled_default())
        }
    }
}
