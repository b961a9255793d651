//! UniFFI bindings for cocktail-lab
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::aggregator;
use crate::client::{CocktailDbClient, RecipeSource};
use crate::config::AppConfig;
use crate::favorites::{FavoritesStore, FileStorage};
use crate::{CocktailError, DrinkSummary, IngredientSlot, RecipeDetail, SearchFilters};

/// FFI-compatible drink summary
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiDrink {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    /// Empty string if unknown
    pub category: String,
}

impl From<DrinkSummary> for FfiDrink {
    fn from(drink: DrinkSummary) -> Self {
        FfiDrink {
            id: drink.id,
            name: drink.name,
            thumbnail_url: drink.thumbnail_url,
            category: drink.category.unwrap_or_default(),
        }
    }
}

/// One ingredient slot. Slots with neither half set are not exported.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredientSlot {
    /// 1-based slot number
    pub position: u32,
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

/// FFI-compatible recipe structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub instructions: String,
    pub slots: Vec<FfiIngredientSlot>,
}

impl From<RecipeDetail> for FfiRecipe {
    fn from(recipe: RecipeDetail) -> Self {
        let slots = recipe
            .slots
            .into_iter()
            .enumerate()
            .filter(|(_, slot)| slot.ingredient.is_some() || slot.measure.is_some())
            .map(|(i, slot)| FfiIngredientSlot {
                position: i as u32 + 1,
                ingredient: slot.ingredient,
                measure: slot.measure,
            })
            .collect();

        FfiRecipe {
            id: recipe.id,
            name: recipe.name,
            thumbnail_url: recipe.thumbnail_url,
            category: recipe.category,
            instructions: recipe.instructions,
            slots,
        }
    }
}

impl From<FfiRecipe> for RecipeDetail {
    fn from(ffi: FfiRecipe) -> Self {
        let mut slots: [IngredientSlot; crate::model::INGREDIENT_SLOTS] = Default::default();
        for exported in ffi.slots {
            let index = (exported.position as usize).saturating_sub(1);
            if let Some(slot) = slots.get_mut(index) {
                slot.ingredient = exported.ingredient;
                slot.measure = exported.measure;
            }
        }

        RecipeDetail {
            id: ffi.id,
            name: ffi.name,
            thumbnail_url: ffi.thumbnail_url,
            category: ffi.category,
            instructions: ffi.instructions,
            slots,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiCocktailError {
    /// Could not reach the recipe API
    NetworkError { message: String },
    /// The API answered with data that did not validate
    InvalidData { message: String },
    /// No recipe with that id
    NotFound { id: String },
    /// Neither ingredient nor category was given
    InvalidFilters,
    /// Local favorites storage failed
    StorageError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiCocktailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiCocktailError::NetworkError { message } => write!(f, "Network error: {}", message),
            FfiCocktailError::InvalidData { message } => write!(f, "Invalid data: {}", message),
            FfiCocktailError::NotFound { id } => write!(f, "Recipe not found: {}", id),
            FfiCocktailError::InvalidFilters => write!(f, "No search filters provided"),
            FfiCocktailError::StorageError { message } => write!(f, "Storage error: {}", message),
            FfiCocktailError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiCocktailError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiCocktailError {}

impl From<CocktailError> for FfiCocktailError {
    fn from(err: CocktailError) -> Self {
        match err {
            CocktailError::Network(e) => FfiCocktailError::NetworkError {
                message: e.to_string(),
            },
            CocktailError::InvalidData(message) => FfiCocktailError::InvalidData { message },
            CocktailError::NotFound(id) => FfiCocktailError::NotFound { id },
            CocktailError::InvalidFilters => FfiCocktailError::InvalidFilters,
            CocktailError::Storage(e) => FfiCocktailError::StorageError {
                message: e.to_string(),
            },
            CocktailError::Serialization(e) => FfiCocktailError::StorageError {
                message: e.to_string(),
            },
            CocktailError::BuilderError(message) => FfiCocktailError::ConfigError { message },
            CocktailError::ConfigError(e) => FfiCocktailError::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

/// Client settings; unset fields use the library defaults
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiClientConfig {
    /// Optional API base URL
    pub base_url: Option<String>,
    /// Optional timeout in seconds
    pub timeout_seconds: Option<u64>,
}

impl FfiClientConfig {
    fn client(self) -> Result<CocktailDbClient, FfiCocktailError> {
        let mut config = AppConfig::default();
        if let Some(base_url) = self.base_url {
            config.api_base_url = base_url;
        }
        if let Some(timeout_secs) = self.timeout_seconds {
            config.timeout = timeout_secs;
        }
        Ok(CocktailDbClient::new(&config)?)
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiCocktailError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiCocktailError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Search by ingredient and/or category
///
/// Results are sorted by name. Fails with `InvalidFilters` when both are blank.
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_drinks(
    ingredient: String,
    category: String,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiDrink>, FfiCocktailError> {
    let client = config.unwrap_or_default().client()?;
    let filters = SearchFilters::new(ingredient, category);
    let rt = create_runtime()?;
    let mut drinks = rt.block_on(aggregator::search(&client, &filters))?;
    drinks.sort_by_cached_key(|d| d.name.to_lowercase());
    Ok(drinks.into_iter().map(FfiDrink::from).collect())
}

/// Browse up to `count` random drinks
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn browse_random_drinks(
    count: u32,
    config: Option<FfiClientConfig>,
) -> Result<Vec<FfiDrink>, FfiCocktailError> {
    let client = config.unwrap_or_default().client()?;
    let concurrency = AppConfig::default().browse_concurrency;
    let rt = create_runtime()?;
    let drinks = rt.block_on(aggregator::browse_random(&client, count as usize, concurrency));
    Ok(drinks.into_iter().map(FfiDrink::from).collect())
}

/// Full recipe for a drink id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_recipe(
    id: String,
    config: Option<FfiClientConfig>,
) -> Result<FfiRecipe, FfiCocktailError> {
    let client = config.unwrap_or_default().client()?;
    let rt = create_runtime()?;
    let recipe = rt.block_on(client.get_by_id(&id))?;
    Ok(recipe.into())
}

/// All recipe categories (empty if the API could not be reached)
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn list_categories(config: Option<FfiClientConfig>) -> Result<Vec<String>, FfiCocktailError> {
    let client = config.unwrap_or_default().client()?;
    let rt = create_runtime()?;
    Ok(rt.block_on(client.list_categories()))
}

/// Favorites list persisted to a JSON file owned by the host app
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct FfiFavorites {
    inner: Mutex<FavoritesStore>,
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
impl FfiFavorites {
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn new(path: String) -> Arc<Self> {
        let storage = FileStorage::new(PathBuf::from(path));
        Arc::new(FfiFavorites {
            inner: Mutex::new(FavoritesStore::load(storage)),
        })
    }

    pub fn add(&self, recipe: FfiRecipe) {
        self.lock().add(recipe.into());
    }

    pub fn remove(&self, id: String) {
        self.lock().remove(&id);
    }

    pub fn contains(&self, id: String) -> bool {
        self.lock().contains(&id)
    }

    pub fn list(&self) -> Vec<FfiRecipe> {
        self.lock().list().into_iter().map(FfiRecipe::from).collect()
    }
}

impl FfiFavorites {
    fn lock(&self) -> std::sync::MutexGuard<'_, FavoritesStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::recipe;

    #[test]
    fn test_ffi_recipe_conversion() {
        let mut detail = recipe("11000", "Mojito", Some("Cocktail"));
        detail.slots[4].ingredient = Some("Mint".to_string());

        let ffi: FfiRecipe = detail.clone().into();
        assert_eq!(ffi.slots.len(), 2);
        assert_eq!(ffi.slots[1].position, 5);
        assert_eq!(ffi.slots[1].measure, None);

        let back: RecipeDetail = ffi.into();
        assert_eq!(back, detail);
    }

    #[test]
    fn test_measure_only_slot_survives_conversion() {
        let mut detail = recipe("11000", "Mojito", Some("Cocktail"));
        detail.slots[3].measure = Some("Garnish".to_string());

        let ffi: FfiRecipe = detail.clone().into();
        let garnish = ffi.slots.iter().find(|s| s.position == 4).unwrap();
        assert_eq!(garnish.ingredient, None);
        assert_eq!(garnish.measure.as_deref(), Some("Garnish"));

        let back: RecipeDetail = ffi.into();
        assert_eq!(back, detail);
    }

    #[test]
    fn test_ffi_favorites_keep_measure_only_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json").to_string_lossy().to_string();
        let mut detail = recipe("2", "Daiquiri", None);
        detail.slots[3].measure = Some("Garnish".to_string());

        FfiFavorites::new(path.clone()).add(detail.clone().into());

        let stored: Vec<RecipeDetail> = FfiFavorites::new(path)
            .list()
            .into_iter()
            .map(RecipeDetail::from)
            .collect();
        assert_eq!(stored, vec![detail]);
    }

    #[test]
    fn test_error_conversion() {
        let err: FfiCocktailError = CocktailError::NotFound("999".to_string()).into();
        assert!(matches!(err, FfiCocktailError::NotFound { ref id } if id == "999"));
        assert_eq!(err.to_string(), "Recipe not found: 999");
    }

    #[test]
    fn test_search_drinks_rejects_blank_filters() {
        let result = search_drinks(" ".to_string(), String::new(), None);
        assert!(matches!(result, Err(FfiCocktailError::InvalidFilters)));
    }

    #[test]
    fn test_ffi_favorites_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json").to_string_lossy().to_string();

        let favorites = FfiFavorites::new(path.clone());
        favorites.add(recipe("1", "Mojito", None).into());
        assert!(favorites.contains("1".to_string()));

        let reopened = FfiFavorites::new(path);
        assert_eq!(reopened.list().len(), 1);
        reopened.remove("1".to_string());
        assert!(!reopened.contains("1".to_string()));
    }

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }
}
