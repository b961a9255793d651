use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of ingredient/measure slots a recipe carries upstream.
pub const INGREDIENT_SLOTS: usize = 15;

/// A recipe category name, treated as an opaque value.
pub type Category = String;

/// A drink as returned by the search and filter endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkSummary {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: Option<Category>,
}

/// One ingredient slot. Either half may be missing on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

/// An ingredient line that has a name, with its optional measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingredient<'a> {
    /// 1-based slot number upstream
    pub position: usize,
    pub name: &'a str,
    pub measure: Option<&'a str>,
}

/// Full recipe as returned by the lookup endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: Option<Category>,
    pub instructions: String,
    #[serde(default)]
    pub slots: [IngredientSlot; INGREDIENT_SLOTS],
}

impl RecipeDetail {
    /// Ingredients with a name, in slot order.
    ///
    /// Gaps are skipped rather than treated as the end of the list; upstream
    /// data is not reliably left-packed.
    pub fn ingredients(&self) -> impl Iterator<Item = Ingredient<'_>> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.ingredient.as_deref().map(|name| Ingredient {
                position: i + 1,
                name,
                measure: slot.measure.as_deref(),
            })
        })
    }

    pub fn summary(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            category: self.category.clone(),
        }
    }
}

impl From<RecipeDetail> for DrinkSummary {
    fn from(recipe: RecipeDetail) -> Self {
        DrinkSummary {
            id: recipe.id,
            name: recipe.name,
            thumbnail_url: recipe.thumbnail_url,
            category: recipe.category,
        }
    }
}

impl fmt::Display for RecipeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.name, self.id)?;
        if let Some(category) = &self.category {
            writeln!(f, "Category: {}", category)?;
        }
        writeln!(f)?;
        writeln!(f, "Ingredients:")?;
        for ingredient in self.ingredients() {
            match ingredient.measure {
                Some(measure) => writeln!(f, "  - {} {}", measure, ingredient.name)?,
                None => writeln!(f, "  - {}", ingredient.name)?,
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.instructions)
    }
}

/// What the user asked to search for. Blank fields count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub ingredient: String,
    pub category: String,
}

impl SearchFilters {
    pub fn new(ingredient: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            category: category.into(),
        }
    }

    pub fn by_ingredient(ingredient: impl Into<String>) -> Self {
        Self::new(ingredient, "")
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self::new("", category)
    }

    /// Trimmed ingredient, if one was given
    pub fn ingredient(&self) -> Option<&str> {
        non_blank(&self.ingredient)
    }

    /// Trimmed category, if one was given
    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    /// Both fields blank: the "browse random drinks" intent
    pub fn is_empty(&self) -> bool {
        self.ingredient().is_none() && self.category().is_none()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        };
        f.write_str(label)
    }
}
