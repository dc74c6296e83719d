//! Catalogue HTTP client.
//!
//! Fetches TravelPrices snapshots from the pricing API and converts them
//! to domain pricelists. Concurrent fetches share one reqwest client and
//! are throttled by a semaphore so a refresh storm cannot pile requests
//! onto the upstream.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::domain::Pricelist;

use super::convert::convert_pricelist;
use super::error::CatalogueError;
use super::types::TravelPricesDto;

/// Default TravelPrices endpoint.
const DEFAULT_ENDPOINT: &str = "https://cosmosodyssey.azurewebsites.net/api/v1.0/TravelPrices";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 2;

/// Configuration for the catalogue client.
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    /// Full TravelPrices URL (defaults to production).
    pub endpoint: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl CatalogueConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalogue API client.
#[derive(Debug, Clone)]
pub struct CatalogueClient {
    http: reqwest::Client,
    endpoint: String,
    semaphore: Arc<Semaphore>,
}

impl CatalogueClient {
    /// Create a client with the given configuration.
    pub fn new(config: CatalogueConfig) -> Result<Self, CatalogueError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// The TravelPrices URL this client fetches.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the current pricelist snapshot.
    ///
    /// Malformed legs and offers in the payload are skipped during
    /// conversion; an unusable snapshot as a whole is an error.
    pub async fn fetch_pricelist(&self) -> Result<Pricelist, CatalogueError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| CatalogueError::Status {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogueError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let dto: TravelPricesDto =
            serde_json::from_str(&body).map_err(|e| CatalogueError::Decode {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        convert_pricelist(dto)
    }
}
