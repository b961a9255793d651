//! In-memory [`RecipeSource`] for unit tests.

use crate::client::RecipeSource;
use crate::error::CocktailError;
use crate::model::{Category, DrinkSummary, RecipeDetail};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn drink(id: &str, name: &str, category: Option<&str>) -> DrinkSummary {
    DrinkSummary {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail_url: format!("https://example.com/{}.jpg", id),
        category: category.map(str::to_string),
    }
}

pub fn recipe(id: &str, name: &str, category: Option<&str>) -> RecipeDetail {
    let mut slots: [crate::model::IngredientSlot; crate::model::INGREDIENT_SLOTS] =
        Default::default();
    slots[0].ingredient = Some("White rum".to_string());
    slots[0].measure = Some("50ml".to_string());
    RecipeDetail {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail_url: format!("https://example.com/{}.jpg", id),
        category: category.map(str::to_string),
        instructions: "Mix ingredients. Serve cold.".to_string(),
        slots,
    }
}

#[derive(Default)]
pub struct FakeSource {
    by_name: HashMap<String, Vec<DrinkSummary>>,
    by_ingredient: HashMap<String, Vec<DrinkSummary>>,
    by_category: HashMap<String, Vec<DrinkSummary>>,
    details: HashMap<String, RecipeDetail>,
    categories: Vec<Category>,
    random: Mutex<VecDeque<Option<DrinkSummary>>>,
    gates: HashMap<String, Arc<Notify>>,
    lookups: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_name_results(mut self, text: &str, drinks: Vec<DrinkSummary>) -> Self {
        self.by_name.insert(text.to_string(), drinks);
        self
    }

    pub fn with_ingredient_results(mut self, text: &str, drinks: Vec<DrinkSummary>) -> Self {
        self.by_ingredient.insert(text.to_string(), drinks);
        self
    }

    pub fn with_category_results(mut self, category: &str, drinks: Vec<DrinkSummary>) -> Self {
        self.by_category.insert(category.to_string(), drinks);
        self
    }

    pub fn with_detail(mut self, id: &str, category: Option<&str>) -> Self {
        let detail = recipe(id, &format!("Drink {}", id), category);
        self.details.insert(id.to_string(), detail);
        self
    }

    pub fn with_recipe(mut self, detail: RecipeDetail) -> Self {
        self.details.insert(detail.id.clone(), detail);
        self
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_random_sequence(self, drinks: Vec<Option<DrinkSummary>>) -> Self {
        *self.random.lock().unwrap() = drinks.into();
        self
    }

    /// Category searches for `category` wait until the returned handle is notified
    pub fn with_gate(mut self, category: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(category.to_string(), gate.clone());
        (self, gate)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    pub fn looked_up(&self, id: &str) -> bool {
        self.lookups.lock().unwrap().iter().any(|i| i == id)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecipeSource for FakeSource {
    async fn search_by_name(&self, text: &str) -> Vec<DrinkSummary> {
        self.record_call();
        self.by_name.get(text).cloned().unwrap_or_default()
    }

    async fn search_by_ingredient(&self, text: &str) -> Vec<DrinkSummary> {
        self.record_call();
        self.by_ingredient.get(text).cloned().unwrap_or_default()
    }

    async fn search_by_category(&self, category: &str) -> Vec<DrinkSummary> {
        self.record_call();
        if let Some(gate) = self.gates.get(category) {
            gate.notified().await;
        }
        self.by_category.get(category).cloned().unwrap_or_default()
    }

    async fn get_by_id(&self, id: &str) -> Result<RecipeDetail, CocktailError> {
        self.record_call();
        self.lookups.lock().unwrap().push(id.to_string());
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| CocktailError::NotFound(id.to_string()))
    }

    async fn list_categories(&self) -> Vec<Category> {
        self.record_call();
        self.categories.clone()
    }

    async fn random_drink(&self) -> Option<DrinkSummary> {
        self.record_call();
        self.random.lock().unwrap().pop_front().flatten()
    }
}
