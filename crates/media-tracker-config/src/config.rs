use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PLACEHOLDER_API_KEY: &str = "YOUR_TMDB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub persistence: PersistenceConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub tracker: TrackerOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where per-user lists, preferences and users are stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// TMDB access for search, details and credits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerOptions {
    #[serde(default)]
    pub reposition_on_revert: RepositionPolicy,
}

/// What happens to an item's list position when a status change is rolled
/// back after a failed write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepositionPolicy {
    /// The item stays at the end of the list where the change put it
    #[default]
    Sticky,
    /// The item returns to the index it had before the change
    Restore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON (true) or plain (false) output; unset picks by terminal
    #[serde(default)]
    pub json: Option<bool>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    /// Starter configuration written by `watchboard config init`
    fn default() -> Self {
        Self {
            persistence: PersistenceConfig {
                base_url: "http://localhost:3000/api".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            catalog: CatalogConfig {
                base_url: default_catalog_base_url(),
                image_base_url: default_image_base_url(),
                api_key: PLACEHOLDER_API_KEY.to_string(),
                timeout_secs: default_timeout_secs(),
            },
            tracker: TrackerOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `TMDB_API_KEY` and `WATCHBOARD_PERSISTENCE_URL` take precedence over the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.trim().is_empty() {
                self.catalog.api_key = key.trim().to_string();
            }
        }
        if let Ok(url) = std::env::var("WATCHBOARD_PERSISTENCE_URL") {
            if !url.trim().is_empty() {
                self.persistence.base_url = url.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_http_url(&self.persistence.base_url) {
            return Err(anyhow::anyhow!(
                "persistence.base_url must be an http(s) URL, got '{}'",
                self.persistence.base_url
            ));
        }
        if !is_http_url(&self.catalog.base_url) {
            return Err(anyhow::anyhow!(
                "catalog.base_url must be an http(s) URL, got '{}'",
                self.catalog.base_url
            ));
        }
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!(
                "catalog.api_key is not configured (set it in the config file or TMDB_API_KEY)"
            ));
        }
        if self.persistence.timeout_secs == 0 || self.catalog.timeout_secs == 0 {
            return Err(anyhow::anyhow!("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        let key = self.catalog.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// Full poster URL for a catalog `poster_path`
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.catalog.image_base_url.trim_end_matches('/'), poster_path)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
