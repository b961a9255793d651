mod cocktail_db;

pub use cocktail_db::CocktailDbClient;

use crate::error::CocktailError;
use crate::model::{Category, DrinkSummary, RecipeDetail};
use async_trait::async_trait;

/// Everything the aggregator and stores need from the recipe API.
///
/// List operations never fail: transport or schema problems come back as an
/// empty list. Only [`RecipeSource::get_by_id`] reports errors, because callers
/// have to react to a missing recipe.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Drinks whose name matches `text`
    async fn search_by_name(&self, text: &str) -> Vec<DrinkSummary>;

    /// Drinks that use the ingredient `text`
    async fn search_by_ingredient(&self, text: &str) -> Vec<DrinkSummary>;

    /// Drinks in `category`. Upstream does not reliably echo the category back.
    async fn search_by_category(&self, category: &str) -> Vec<DrinkSummary>;

    /// Full recipe for `id`
    async fn get_by_id(&self, id: &str) -> Result<RecipeDetail, CocktailError>;

    /// All known categories
    async fn list_categories(&self) -> Vec<Category>;

    /// A single random drink, or `None` if the call failed
    async fn random_drink(&self) -> Option<DrinkSummary>;
}
