use thiserror::Error;

/// Errors that can occur while talking to the recipe API or managing local state
#[derive(Error, Debug)]
pub enum CocktailError {
    /// Transport-level failure talking to the recipe API
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// A response did not match the expected schema
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A lookup by id returned no record
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Neither an ingredient nor a category was supplied
    #[error("No search filters provided")]
    InvalidFilters,

    /// Reading or writing local storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Favorites could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl CocktailError {
    /// True when the error is the kind a caller should show as "nothing there"
    /// rather than as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CocktailError::NotFound(_))
    }
}
