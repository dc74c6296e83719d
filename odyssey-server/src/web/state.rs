//! Application state for the web layer.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::cache::CachedCatalogue;
use crate::catalogue::CatalogueError;
use crate::domain::Pricelist;
use crate::search::SearchLimits;
use crate::store::Store;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached catalogue client
    pub catalogue: Arc<CachedCatalogue>,

    /// Pricelist retention and bookings
    pub store: Store,

    /// Search engine budgets
    pub limits: Arc<SearchLimits>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalogue: CachedCatalogue, store: Store, limits: SearchLimits) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            store,
            limits: Arc::new(limits),
        }
    }

    /// The pricelist requests should work against.
    ///
    /// Serves the stored snapshot while it is unexpired; otherwise fetches
    /// a fresh one and records it in retention. When the upstream is down
    /// an expired stored snapshot is served rather than failing the
    /// request; only with nothing stored at all does the error surface.
    pub async fn active_pricelist(&self) -> Result<Arc<Pricelist>, CatalogueError> {
        let now = Utc::now();

        if let Some(current) = self.store.current_pricelist().await {
            if !current.is_expired(now) {
                return Ok(current);
            }
        }

        match self.catalogue.fetch_pricelist().await {
            Ok(fresh) => {
                self.store.insert_pricelist((*fresh).clone()).await;
                Ok(fresh)
            }
            Err(e) => match self.store.current_pricelist().await {
                Some(stale) => {
                    warn!(
                        error = %e,
                        snapshot = stale.id(),
                        "refresh failed, serving stale pricelist"
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }
}
