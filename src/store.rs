//! The application store that views drive.
//!
//! State lives in a [`watch`] channel so views can subscribe to changes.
//! Every change goes through [`AppState::reduce`]. Favorites are kept in their
//! own [`FavoritesStore`]; the two halves share no mutable state.

use crate::aggregator;
use crate::client::RecipeSource;
use crate::config::AppConfig;
use crate::error::CocktailError;
use crate::favorites::FavoritesStore;
use crate::model::{Category, DrinkSummary, RecipeDetail, SearchFilters, Severity};
use crate::notification::Notification;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

pub const MSG_ADDED_TO_FAVORITES: &str = "Added to favorites";
pub const MSG_REMOVED_FROM_FAVORITES: &str = "Removed from favorites";
pub const MSG_DETAILS_FAILED: &str = "Unable to load cocktail details";
pub const MSG_NO_MATCHES: &str = "No cocktails matched your search";
pub const MSG_BROWSE_FAILED: &str = "Unable to load cocktails right now";

/// Snapshot of everything the views render (favorites excepted)
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub categories: Vec<Category>,
    pub drinks: Vec<DrinkSummary>,
    pub selected_recipe: Option<RecipeDetail>,
    pub modal_open: bool,
    pub is_loading: bool,
    pub has_searched: bool,
    pub notification: Option<Notification>,
    latest_search: u64,
}

#[derive(Debug, Clone)]
pub enum Action {
    CategoriesLoaded(Vec<Category>),
    SearchStarted {
        seq: u64,
    },
    SearchCompleted {
        seq: u64,
        drinks: Vec<DrinkSummary>,
        notice: Option<Notification>,
    },
    /// The search with this number is over, whether or not it completed
    SearchSettled {
        seq: u64,
    },
    RecipeSelected(RecipeDetail),
    ModalClosed,
    Notify(Notification),
    NotificationDismissed,
}

impl AppState {
    /// Apply `action`. Returns whether anything changed.
    pub fn reduce(&mut self, action: Action) -> bool {
        match action {
            Action::CategoriesLoaded(categories) => {
                self.categories = categories;
            }
            Action::SearchStarted { seq } => {
                if seq < self.latest_search {
                    return false;
                }
                self.latest_search = seq;
                self.is_loading = true;
                self.has_searched = true;
            }
            Action::SearchCompleted {
                seq,
                drinks,
                notice,
            } => {
                if seq != self.latest_search {
                    debug!(
                        "Dropping results of search #{} (latest is #{})",
                        seq, self.latest_search
                    );
                    return false;
                }
                self.drinks = drinks;
                self.is_loading = false;
                if notice.is_some() {
                    self.notification = notice;
                }
            }
            Action::SearchSettled { seq } => {
                if seq != self.latest_search || !self.is_loading {
                    return false;
                }
                self.is_loading = false;
            }
            Action::RecipeSelected(recipe) => {
                self.selected_recipe = Some(recipe);
                self.modal_open = true;
            }
            Action::ModalClosed => {
                self.modal_open = false;
                self.selected_recipe = None;
            }
            Action::Notify(notification) => {
                self.notification = Some(notification);
            }
            Action::NotificationDismissed => {
                if self.notification.take().is_none() {
                    return false;
                }
            }
        }
        true
    }

    /// The notification, unless its display time is up
    pub fn active_notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| !n.is_expired())
    }
}

/// Clears the loading flag when a search ends, including when its future is dropped.
struct SearchGuard<'a> {
    store: &'a AppStore,
    seq: u64,
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        self.store.dispatch(Action::SearchSettled { seq: self.seq });
    }
}

pub struct AppStore {
    source: Arc<dyn RecipeSource>,
    favorites: Mutex<FavoritesStore>,
    state: watch::Sender<AppState>,
    search_seq: AtomicU64,
    random_sample_size: usize,
    browse_concurrency: usize,
    notification_lifetime: Duration,
}

impl AppStore {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        favorites: FavoritesStore,
        config: &AppConfig,
    ) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            source,
            favorites: Mutex::new(favorites),
            state,
            search_seq: AtomicU64::new(0),
            random_sample_size: config.random_sample_size,
            browse_concurrency: config.browse_concurrency,
            notification_lifetime: config.notification_timeout(),
        }
    }

    pub fn source(&self) -> &dyn RecipeSource {
        self.source.as_ref()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: Action) {
        self.state.send_if_modified(|state| state.reduce(action));
    }

    pub async fn fetch_categories(&self) {
        let categories = self.source.list_categories().await;
        info!("Loaded {} categories", categories.len());
        self.dispatch(Action::CategoriesLoaded(categories));
    }

    /// Search with `filters`, or browse random drinks when both are blank.
    ///
    /// Filtered results are sorted by name; browse results keep API order.
    /// Returns what this search found, even if a newer search has since
    /// replaced it in the state.
    pub async fn search(&self, filters: SearchFilters) -> Vec<DrinkSummary> {
        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(Action::SearchStarted { seq });
        let _guard = SearchGuard { store: self, seq };

        let (drinks, notice) = if filters.is_empty() {
            let drinks = aggregator::browse_random(
                self.source.as_ref(),
                self.random_sample_size,
                self.browse_concurrency,
            )
            .await;
            let notice = drinks
                .is_empty()
                .then(|| Notification::error(MSG_BROWSE_FAILED, self.notification_lifetime));
            (drinks, notice)
        } else {
            let drinks = match aggregator::search(self.source.as_ref(), &filters).await {
                Ok(mut drinks) => {
                    sort_by_name(&mut drinks);
                    drinks
                }
                Err(e) => {
                    warn!("Search {:?} failed: {}", filters, e);
                    Vec::new()
                }
            };
            let notice = drinks
                .is_empty()
                .then(|| Notification::info(MSG_NO_MATCHES, self.notification_lifetime));
            (drinks, notice)
        };

        self.dispatch(Action::SearchCompleted {
            seq,
            drinks: drinks.clone(),
            notice,
        });
        drinks
    }

    /// Load a recipe and open it in the modal
    pub async fn select_recipe(&self, id: &str) -> Result<RecipeDetail, CocktailError> {
        match self.source.get_by_id(id).await {
            Ok(recipe) => {
                self.dispatch(Action::RecipeSelected(recipe.clone()));
                Ok(recipe)
            }
            Err(e) => {
                warn!("Failed to load recipe {}: {}", id, e);
                self.notify(MSG_DETAILS_FAILED, Severity::Error);
                Err(e)
            }
        }
    }

    pub fn close_modal(&self) {
        self.dispatch(Action::ModalClosed);
    }

    pub fn add_favorite(&self, recipe: RecipeDetail) {
        self.lock_favorites().add(recipe);
        self.notify(MSG_ADDED_TO_FAVORITES, Severity::Success);
    }

    pub fn remove_favorite(&self, id: &str) {
        self.lock_favorites().remove(id);
        self.notify(MSG_REMOVED_FROM_FAVORITES, Severity::Info);
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.lock_favorites().contains(id)
    }

    /// Add the recipe if it is not a favorite yet, remove it otherwise.
    /// Returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&self, recipe: RecipeDetail) -> bool {
        if self.is_favorite(&recipe.id) {
            self.remove_favorite(&recipe.id);
            false
        } else {
            self.add_favorite(recipe);
            true
        }
    }

    /// Favorites sorted by name
    pub fn favorites(&self) -> Vec<RecipeDetail> {
        self.lock_favorites().list()
    }

    pub fn clear_favorites(&self) {
        self.lock_favorites().clear();
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notification = Notification::new(message, severity, self.notification_lifetime);
        self.dispatch(Action::Notify(notification));
    }

    pub fn notification(&self) -> Option<Notification> {
        self.state.borrow().active_notification().cloned()
    }

    pub fn dismiss_notification(&self) {
        self.dispatch(Action::NotificationDismissed);
    }

    fn lock_favorites(&self) -> MutexGuard<'_, FavoritesStore> {
        self.favorites.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sort_by_name(drinks: &mut [DrinkSummary]) {
    drinks.sort_by_cached_key(|drink| drink.name.to_lowercase());
}
