pub mod aggregator;
pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod notification;
pub mod schema;
pub mod store;
#[cfg(test)]
mod testing;

// UniFFI bindings for mobile platforms
pub mod uniffi_bindings;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

pub use builder::{CocktailLab, CocktailLabBuilder, StorageTarget};
pub use client::{CocktailDbClient, RecipeSource};
pub use config::AppConfig;
pub use error::CocktailError;
pub use favorites::{FavoritesStorage, FavoritesStore, FileStorage, MemoryStorage};
pub use model::{
    Category, DrinkSummary, Ingredient, IngredientSlot, RecipeDetail, SearchFilters, Severity,
};
pub use notification::Notification;
pub use store::{AppState, AppStore};

/// Run a filtered search against the public API with default settings.
///
/// # Example
/// ```no_run
/// # use cocktail_lab::{search_cocktails, SearchFilters};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let drinks = search_cocktails(&SearchFilters::by_ingredient("gin")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_cocktails(filters: &SearchFilters) -> Result<Vec<DrinkSummary>, CocktailError> {
    let client = CocktailDbClient::new(&AppConfig::default())?;
    aggregator::search(&client, filters).await
}

/// Look up one recipe by id against the public API with default settings.
pub async fn lookup_recipe(id: &str) -> Result<RecipeDetail, CocktailError> {
    let client = CocktailDbClient::new(&AppConfig::default())?;
    client.get_by_id(id).await
}
