use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the cocktail client and stores
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the recipe API, without a trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// File that mirrors the favorites list
    #[serde(default = "default_favorites_path")]
    pub favorites_path: PathBuf,
    /// How many random drinks a browse (no filters) asks for
    #[serde(default = "default_random_sample_size")]
    pub random_sample_size: usize,
    /// Maximum number of random lookups in flight at once
    #[serde(default = "default_browse_concurrency")]
    pub browse_concurrency: usize,
    /// How long a notification stays visible, in milliseconds
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            favorites_path: default_favorites_path(),
            random_sample_size: default_random_sample_size(),
            browse_concurrency: default_browse_concurrency(),
            notification_timeout_ms: default_notification_timeout_ms(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://www.thecocktaildb.com/api/json/v1/1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("cocktail-lab/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_favorites_path() -> PathBuf {
    PathBuf::from(format!("{}.json", crate::favorites::FAVORITES_STORAGE_KEY))
}

fn default_random_sample_size() -> usize {
    150
}

fn default_browse_concurrency() -> usize {
    8
}

fn default_notification_timeout_ms() -> u64 {
    3000
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COCKTAIL_LAB__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COCKTAIL_LAB__API_BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// HTTP request timeout. Zero is raised to one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore as the prefix separator: COCKTAIL_LAB__TIMEOUT
        .add_source(
            Environment::with_prefix("COCKTAIL_LAB")
                .prefix_separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
