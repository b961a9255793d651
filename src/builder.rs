use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::client::{CocktailDbClient, RecipeSource};
use crate::config::AppConfig;
use crate::error::CocktailError;
use crate::favorites::{FavoritesStore, FileStorage, MemoryStorage};
use crate::store::AppStore;

/// Where favorites are persisted
#[derive(Debug, Clone)]
pub enum StorageTarget {
    /// JSON file at the given path
    File(PathBuf),
    /// Shared in-memory slot; nothing touches the disk
    Memory(MemoryStorage),
}

/// Builder for wiring the client, favorites storage and store together
#[derive(Default)]
pub struct CocktailLabBuilder {
    config: Option<AppConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    storage: Option<StorageTarget>,
    source: Option<Arc<dyn RecipeSource>>,
}

impl CocktailLabBuilder {
    /// Start from an explicit configuration instead of [`AppConfig::load`]
    ///
    /// # Example
    /// ```
    /// use cocktail_lab::{AppConfig, CocktailLab};
    ///
    /// let builder = CocktailLab::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Point the client at a different API root
    ///
    /// # Example
    /// ```
    /// use cocktail_lab::CocktailLab;
    ///
    /// let builder = CocktailLab::builder()
    ///     .base_url("http://localhost:8080/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests. Overrides the configured one and must be non-zero.
    ///
    /// # Example
    /// ```
    /// use cocktail_lab::CocktailLab;
    /// use std::time::Duration;
    ///
    /// let builder = CocktailLab::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Persist favorites to this file
    pub fn favorites_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage = Some(StorageTarget::File(path.into()));
        self
    }

    /// Keep favorites in memory only
    ///
    /// # Example
    /// ```
    /// use cocktail_lab::{CocktailLab, MemoryStorage};
    ///
    /// let builder = CocktailLab::builder().in_memory(MemoryStorage::new());
    /// ```
    pub fn in_memory(mut self, storage: MemoryStorage) -> Self {
        self.storage = Some(StorageTarget::Memory(storage));
        self
    }

    /// Use a custom recipe source instead of the HTTP client
    pub fn source(mut self, source: Arc<dyn RecipeSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the store
    ///
    /// # Errors
    /// Returns `CocktailError` if:
    /// - configuration cannot be loaded
    /// - a base URL is combined with a custom source
    /// - the timeout or the random sample size is zero
    /// - the HTTP client cannot be created
    pub fn build(self) -> Result<AppStore, CocktailError> {
        let mut config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };

        if let Some(url) = self.base_url {
            if self.source.is_some() {
                return Err(CocktailError::BuilderError(
                    "base_url() has no effect together with source()".to_string(),
                ));
            }
            config.api_base_url = url;
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(CocktailError::BuilderError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if config.random_sample_size == 0 {
            return Err(CocktailError::BuilderError(
                "random_sample_size must be at least 1".to_string(),
            ));
        }

        let source: Arc<dyn RecipeSource> = match self.source {
            Some(source) => source,
            None => Arc::new(http_client(&config, self.timeout)?),
        };

        let storage = self
            .storage
            .unwrap_or_else(|| StorageTarget::File(config.favorites_path.clone()));
        debug!("Favorites storage: {:?}", storage);
        let favorites = match storage {
            StorageTarget::File(path) => FavoritesStore::load(FileStorage::new(path)),
            StorageTarget::Memory(memory) => FavoritesStore::load(memory),
        };

        Ok(AppStore::new(source, favorites, &config))
    }
}

// An explicit builder timeout is used as given, sub-second precision included.
fn http_client(
    config: &AppConfig,
    timeout: Option<Duration>,
) -> Result<CocktailDbClient, CocktailError> {
    match timeout {
        Some(timeout) => CocktailDbClient::with_timeout(config, timeout),
        None => CocktailDbClient::new(config),
    }
}

/// Main entry point for the builder API
pub struct CocktailLab;

impl CocktailLab {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use cocktail_lab::CocktailLab;
    ///
    /// let builder = CocktailLab::builder();
    /// ```
    pub fn builder() -> CocktailLabBuilder {
        CocktailLabBuilder::default()
    }
}
