//! Caching layer for catalogue snapshots.
//!
//! Pricelists change only when the upstream rolls a new snapshot, so
//! concurrent searches should share one fetch rather than each hitting
//! the pricing API. A short TTL keeps the served snapshot fresh without
//! polling on every request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::catalogue::{CatalogueClient, CatalogueError};
use crate::domain::Pricelist;

/// Configuration for the snapshot cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the cached snapshot.
    pub ttl: Duration,

    /// Maximum number of cached snapshots. One endpoint serves one
    /// snapshot, so this stays tiny.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 4,
        }
    }
}

/// Catalogue client with snapshot caching.
///
/// Wraps a `CatalogueClient` and caches the fetched pricelist, keyed by
/// endpoint URL.
pub struct CachedCatalogue {
    client: CatalogueClient,
    snapshots: MokaCache<String, Arc<Pricelist>>,
}

impl CachedCatalogue {
    /// Create a cached catalogue around an existing client.
    pub fn new(client: CatalogueClient, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, snapshots }
    }

    /// Fetch the current pricelist, using the cache when fresh.
    pub async fn fetch_pricelist(&self) -> Result<Arc<Pricelist>, CatalogueError> {
        let key = self.client.endpoint().to_string();

        if let Some(cached) = self.snapshots.get(&key).await {
            return Ok(cached);
        }

        let pricelist = Arc::new(self.client.fetch_pricelist().await?);
        self.snapshots.insert(key, pricelist.clone()).await;

        Ok(pricelist)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &CatalogueClient {
        &self.client
    }

    /// Number of cached snapshots (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.snapshots.entry_count()
    }

    /// Drop any cached snapshot so the next fetch goes upstream.
    pub fn invalidate(&self) {
        self.snapshots.invalidate_all();
    }
}
