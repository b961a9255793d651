//! Validation of the JSON shapes returned by TheCocktailDB.
//!
//! Every endpoint answers with `{ "drinks": [...] | null }`. A null list means
//! "no results" and is not an error. Records are validated one at a time so a
//! single bad entry does not take the rest of a list down with it.

use crate::error::CocktailError;
use crate::model::{Category, DrinkSummary, IngredientSlot, RecipeDetail, INGREDIENT_SLOTS};
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct RawDrink {
    #[serde(rename = "idDrink")]
    id: Option<String>,
    #[serde(rename = "strDrink")]
    name: Option<String>,
    #[serde(rename = "strDrinkThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(flatten)]
    drink: RawDrink,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    // strIngredient1..15 / strMeasure1..15 and whatever else upstream sends
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(rename = "strCategory")]
    category: Option<String>,
}

/// Parse a drinks-list envelope, skipping records that fail validation.
pub fn parse_drinks(body: &Value) -> Result<Vec<DrinkSummary>, CocktailError> {
    let records = drinks_array(body)?;
    let mut drinks = Vec::with_capacity(records.len());
    for record in records {
        match validate_drink(record) {
            Ok(drink) => drinks.push(drink),
            Err(e) => warn!("Skipping drink record: {}", e),
        }
    }
    Ok(drinks)
}

/// Parse the category-list envelope. Blank entries are dropped.
pub fn parse_categories(body: &Value) -> Result<Vec<Category>, CocktailError> {
    let records = drinks_array(body)?;
    let mut categories = Vec::with_capacity(records.len());
    for record in records {
        match RawCategory::deserialize(record) {
            Ok(raw) => {
                if let Some(category) = required_text(raw.category) {
                    categories.push(category);
                }
            }
            Err(e) => warn!("Skipping category record: {}", e),
        }
    }
    Ok(categories)
}

/// Parse a lookup-by-id envelope into the first recipe it holds.
///
/// An empty or null list is [`CocktailError::NotFound`]; a record that does not
/// validate is [`CocktailError::InvalidData`].
pub fn parse_recipe_lookup(body: &Value, id: &str) -> Result<RecipeDetail, CocktailError> {
    let records = drinks_array(body)?;
    let record = records
        .first()
        .ok_or_else(|| CocktailError::NotFound(id.to_string()))?;
    validate_recipe(record)
}

pub fn validate_drink(record: &Value) -> Result<DrinkSummary, CocktailError> {
    let raw = RawDrink::deserialize(record)
        .map_err(|e| CocktailError::InvalidData(format!("malformed drink: {}", e)))?;
    summary_from_raw(raw)
}

pub fn validate_recipe(record: &Value) -> Result<RecipeDetail, CocktailError> {
    let raw = RawRecipe::deserialize(record)
        .map_err(|e| CocktailError::InvalidData(format!("malformed recipe: {}", e)))?;

    let summary = summary_from_raw(raw.drink)?;
    let instructions = required_text(raw.instructions).ok_or_else(|| {
        CocktailError::InvalidData(format!("recipe {} has no instructions", summary.id))
    })?;

    let mut slots: [IngredientSlot; INGREDIENT_SLOTS] = Default::default();
    for (i, slot) in slots.iter_mut().enumerate() {
        let n = i + 1;
        slot.ingredient = slot_text(&raw.rest, &format!("strIngredient{}", n));
        slot.measure = slot_text(&raw.rest, &format!("strMeasure{}", n));
    }

    Ok(RecipeDetail {
        id: summary.id,
        name: summary.name,
        thumbnail_url: summary.thumbnail_url,
        category: summary.category,
        instructions,
        slots,
    })
}

fn drinks_array(body: &Value) -> Result<&[Value], CocktailError> {
    let envelope = body
        .as_object()
        .ok_or_else(|| CocktailError::InvalidData("response is not a JSON object".to_string()))?;

    match envelope.get("drinks") {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(records)) => Ok(records.as_slice()),
        Some(other) => Err(CocktailError::InvalidData(format!(
            "expected `drinks` to be a list, got {}",
            other
        ))),
    }
}

fn summary_from_raw(raw: RawDrink) -> Result<DrinkSummary, CocktailError> {
    let id = required_text(raw.id)
        .ok_or_else(|| CocktailError::InvalidData("drink is missing idDrink".to_string()))?;
    let name = required_text(raw.name).ok_or_else(|| {
        CocktailError::InvalidData(format!("drink {} is missing strDrink", id))
    })?;
    let thumbnail_url = required_text(raw.thumbnail).ok_or_else(|| {
        CocktailError::InvalidData(format!("drink {} is missing strDrinkThumb", id))
    })?;

    Ok(DrinkSummary {
        id,
        name,
        thumbnail_url,
        category: required_text(raw.category),
    })
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn slot_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
