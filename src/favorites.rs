//! Favorite recipes, mirrored to local storage on every change.

use crate::error::CocktailError;
use crate::model::RecipeDetail;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::NamedTempFile;

/// Key the favorites list is stored under.
pub const FAVORITES_STORAGE_KEY: &str = "cocktail-lab-favorites";

/// A single string slot of persistent storage.
pub trait FavoritesStorage: Send {
    /// The stored value, or `None` if nothing was ever written
    fn read(&self) -> Result<Option<String>, CocktailError>;

    fn write(&mut self, value: &str) -> Result<(), CocktailError>;
}

/// Stores favorites as a JSON file. Writes go through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/cocktail-lab-favorites.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", FAVORITES_STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, CocktailError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, value: &str) -> Result<(), CocktailError> {
        let parent_dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    /// What is currently stored
    pub fn value(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FavoritesStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, CocktailError> {
        Ok(self.value())
    }

    fn write(&mut self, value: &str) -> Result<(), CocktailError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        Ok(())
    }
}

/// Favorite recipes keyed by drink id
pub struct FavoritesStore {
    favorites: HashMap<String, RecipeDetail>,
    storage: Box<dyn FavoritesStorage>,
}

impl FavoritesStore {
    /// Load the persisted list. Anything unreadable starts an empty list.
    pub fn load(storage: impl FavoritesStorage + 'static) -> Self {
        let favorites = match read_favorites(&storage) {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Discarding stored favorites: {}", e);
                HashMap::new()
            }
        };
        debug!("Loaded {} favorites", favorites.len());

        Self {
            favorites,
            storage: Box::new(storage),
        }
    }

    /// Add or refresh a favorite
    pub fn add(&mut self, recipe: RecipeDetail) {
        self.favorites.insert(recipe.id.clone(), recipe);
        self.persist();
    }

    /// Remove a favorite; unknown ids are ignored
    pub fn remove(&mut self, id: &str) {
        if self.favorites.remove(id).is_some() {
            debug!("Removed favorite {}", id);
            self.persist();
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&RecipeDetail> {
        self.favorites.get(id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// All favorites, sorted by name
    pub fn list(&self) -> Vec<RecipeDetail> {
        let mut recipes: Vec<RecipeDetail> = self.favorites.values().cloned().collect();
        recipes.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        recipes
    }

    pub fn clear(&mut self) {
        self.favorites.clear();
        self.persist();
    }

    // The in-memory change stands even when the write fails.
    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            error!("Failed to save favorites: {}", e);
        }
    }

    fn try_persist(&mut self) -> Result<(), CocktailError> {
        let recipes: Vec<&RecipeDetail> = self.favorites.values().collect();
        let json = serde_json::to_string(&recipes)?;
        self.storage.write(&json)
    }
}

fn read_favorites(
    storage: &dyn FavoritesStorage,
) -> Result<HashMap<String, RecipeDetail>, CocktailError> {
    let Some(stored) = storage.read()? else {
        return Ok(HashMap::new());
    };

    let recipes: Vec<RecipeDetail> = serde_json::from_str(&stored)?;
    Ok(recipes
        .into_iter()
        .map(|recipe| (recipe.id.clone(), recipe))
        .collect())
}
