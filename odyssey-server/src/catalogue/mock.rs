//! File-backed catalogue source for testing without API access.
//!
//! Loads a TravelPrices snapshot from a JSON file and serves it as if it
//! came from the live API.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Pricelist;

use super::convert::convert_pricelist;
use super::error::CatalogueError;
use super::types::TravelPricesDto;

/// Catalogue source that serves a snapshot loaded from a JSON file.
///
/// Useful for development and tests that must not touch the live pricing
/// API.
#[derive(Clone)]
pub struct FileCatalogue {
    snapshot: Arc<RwLock<Pricelist>>,
}

impl FileCatalogue {
    /// Load a TravelPrices JSON file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let pricelist = load_snapshot(path.as_ref())?;
        Ok(Self {
            snapshot: Arc::new(RwLock::new(pricelist)),
        })
    }

    /// Serve the loaded snapshot.
    ///
    /// Mimics the real `CatalogueClient::fetch_pricelist` interface.
    pub async fn fetch_pricelist(&self) -> Result<Pricelist, CatalogueError> {
        Ok(self.snapshot.read().await.clone())
    }

    /// Reload the snapshot from disk (useful for development).
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<(), CatalogueError> {
        let fresh = load_snapshot(path.as_ref())?;
        *self.snapshot.write().await = fresh;
        Ok(())
    }
}

fn load_snapshot(path: &Path) -> Result<Pricelist, CatalogueError> {
    let json = std::fs::read_to_string(path).map_err(|e| CatalogueError::Status {
        status: 0,
        message: format!("Failed to read {:?}: {}", path, e),
    })?;

    let dto: TravelPricesDto = serde_json::from_str(&json).map_err(|e| CatalogueError::Decode {
        message: e.to_string(),
        body: Some(json.chars().take(500).collect()),
    })?;

    convert_pricelist(dto)
}
