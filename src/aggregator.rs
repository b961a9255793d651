//! Combines the per-endpoint searches into one result list.
//!
//! Which endpoints are hit depends on the filters:
//! 1. ingredient only: name search + ingredient filter, deduplicated
//! 2. category only: category filter, with the category stamped on every record
//! 3. both: the ingredient union, enriched with categories, then narrowed to the
//!    requested category (case-insensitive)
//!
//! Both filters empty is rejected with [`CocktailError::InvalidFilters`]; random
//! browsing goes through [`browse_random`] instead.

use crate::client::RecipeSource;
use crate::error::CocktailError;
use crate::model::{DrinkSummary, SearchFilters};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use log::{debug, info};
use std::collections::HashMap;

/// Run a filtered search. Results are not sorted.
pub async fn search(
    source: &dyn RecipeSource,
    filters: &SearchFilters,
) -> Result<Vec<DrinkSummary>, CocktailError> {
    let drinks = match (filters.ingredient(), filters.category()) {
        (None, None) => return Err(CocktailError::InvalidFilters),
        (Some(ingredient), None) => search_ingredient(source, ingredient).await,
        (None, Some(category)) => search_category(source, category).await,
        (Some(ingredient), Some(category)) => {
            let drinks = search_ingredient(source, ingredient).await;
            let drinks = enrich_categories(source, drinks).await;
            retain_category(drinks, category)
        }
    };

    info!("Search {:?} returned {} drinks", filters, drinks.len());
    Ok(drinks)
}

async fn search_ingredient(source: &dyn RecipeSource, ingredient: &str) -> Vec<DrinkSummary> {
    let (by_name, by_ingredient) = tokio::join!(
        source.search_by_name(ingredient),
        source.search_by_ingredient(ingredient)
    );
    debug!(
        "'{}': {} by name, {} by ingredient",
        ingredient,
        by_name.len(),
        by_ingredient.len()
    );

    dedupe_by_id(by_name.into_iter().chain(by_ingredient))
}

async fn search_category(source: &dyn RecipeSource, category: &str) -> Vec<DrinkSummary> {
    // filter.php?c= does not echo the category, so the request is the source of truth
    source
        .search_by_category(category)
        .await
        .into_iter()
        .map(|drink| DrinkSummary {
            category: Some(category.to_string()),
            ..drink
        })
        .collect()
}

fn retain_category(drinks: Vec<DrinkSummary>, category: &str) -> Vec<DrinkSummary> {
    let wanted = category.to_lowercase();
    drinks
        .into_iter()
        .filter(|drink| {
            drink
                .category
                .as_deref()
                .is_some_and(|c| c.trim().to_lowercase() == wanted)
        })
        .collect()
}

/// Collapse records sharing an id.
///
/// The first occurrence is kept, in its original position. If it has no
/// category and a later duplicate does, the later category is adopted.
pub fn dedupe_by_id(drinks: impl IntoIterator<Item = DrinkSummary>) -> Vec<DrinkSummary> {
    let mut unique: Vec<DrinkSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for drink in drinks {
        match index.get(&drink.id) {
            Some(&i) => {
                let kept = &mut unique[i];
                if kept.category.is_none() && drink.category.is_some() {
                    kept.category = drink.category;
                }
            }
            None => {
                index.insert(drink.id.clone(), unique.len());
                unique.push(drink);
            }
        }
    }

    unique
}

/// Fill in missing categories with one lookup per record, all in flight at once.
///
/// Records that already have a category are not looked up. A failed lookup
/// leaves the category empty; no record is dropped.
pub async fn enrich_categories(
    source: &dyn RecipeSource,
    drinks: Vec<DrinkSummary>,
) -> Vec<DrinkSummary> {
    let lookups = drinks.into_iter().map(|mut drink| async move {
        if drink.category.is_none() {
            match source.get_by_id(&drink.id).await {
                Ok(detail) => drink.category = detail.category,
                Err(e) => debug!("No category for {}: {}", drink.id, e),
            }
        }
        drink
    });

    join_all(lookups).await
}

/// Fetch `count` random drinks, at most `concurrency` requests at a time.
///
/// Failed calls are dropped and repeats are removed. Order is the order the
/// drinks were requested in.
pub async fn browse_random(
    source: &dyn RecipeSource,
    count: usize,
    concurrency: usize,
) -> Vec<DrinkSummary> {
    let drinks: Vec<DrinkSummary> = stream::iter(0..count)
        .map(|_| source.random_drink())
        .buffered(concurrency.max(1))
        .filter_map(|drink| async move { drink })
        .collect()
        .await;

    let drinks = dedupe_by_id(drinks);
    info!("Random browse returned {} distinct drinks", drinks.len());
    drinks
}
