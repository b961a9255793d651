use crate::client::RecipeSource;
use crate::config::AppConfig;
use crate::error::CocktailError;
use crate::model::{Category, DrinkSummary, RecipeDetail};
use crate::schema;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for TheCocktailDB JSON API.
///
/// No retries and no caching: every call is a fresh round-trip.
pub struct CocktailDbClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl CocktailDbClient {
    /// Create a client from configuration (base URL, timeout, user agent)
    pub fn new(config: &AppConfig) -> Result<Self, CocktailError> {
        Self::with_timeout(config, config.request_timeout())
    }

    /// Like [`CocktailDbClient::new`], with `timeout` in place of the configured one
    pub fn with_timeout(config: &AppConfig, timeout: Duration) -> Result<Self, CocktailError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(CocktailDbClient {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: Some(timeout),
        })
    }

    /// Create a client with default HTTP settings against `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        CocktailDbClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout, `None` for reqwest's default
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn get_json(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, CocktailError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            CocktailError::InvalidData(format!("{} returned a non-JSON body: {}", endpoint, e))
        })
    }

    async fn fetch_drinks(&self, endpoint: &str, query: &[(&str, &str)]) -> Vec<DrinkSummary> {
        let result = match self.get_json(endpoint, query).await {
            Ok(body) => schema::parse_drinks(&body),
            Err(e) => Err(e),
        };

        match result {
            Ok(drinks) => {
                debug!("{} {:?} -> {} drinks", endpoint, query, drinks.len());
                drinks
            }
            Err(e) => {
                warn!("{} {:?} failed: {}", endpoint, query, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl RecipeSource for CocktailDbClient {
    async fn search_by_name(&self, text: &str) -> Vec<DrinkSummary> {
        self.fetch_drinks("search.php", &[("s", text)]).await
    }

    async fn search_by_ingredient(&self, text: &str) -> Vec<DrinkSummary> {
        self.fetch_drinks("filter.php", &[("i", text)]).await
    }

    async fn search_by_category(&self, category: &str) -> Vec<DrinkSummary> {
        self.fetch_drinks("filter.php", &[("c", category)]).await
    }

    async fn get_by_id(&self, id: &str) -> Result<RecipeDetail, CocktailError> {
        let body = self.get_json("lookup.php", &[("i", id)]).await?;
        schema::parse_recipe_lookup(&body, id)
    }

    async fn list_categories(&self) -> Vec<Category> {
        let result = match self.get_json("list.php", &[("c", "list")]).await {
            Ok(body) => schema::parse_categories(&body),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            warn!("Failed to load categories: {}", e);
            Vec::new()
        })
    }

    async fn random_drink(&self) -> Option<DrinkSummary> {
        self.fetch_drinks("random.php", &[]).await.into_iter().next()
    }
}
