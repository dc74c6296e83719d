use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use odyssey_server::cache::{CacheConfig, CachedCatalogue};
use odyssey_server::catalogue::{CatalogueClient, CatalogueConfig};
use odyssey_server::search::SearchLimits;
use odyssey_server::store::Store;
use odyssey_server::web::{AppState, create_router};

/// How often to poll the catalogue for a new snapshot.
const PRICELIST_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("ODYSSEY_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let mut catalogue_config = CatalogueConfig::new();
    if let Ok(url) = std::env::var("ODYSSEY_CATALOGUE_URL") {
        catalogue_config = catalogue_config.with_endpoint(url);
    }

    let client =
        CatalogueClient::new(catalogue_config).expect("Failed to create catalogue client");
    let catalogue = CachedCatalogue::new(client, &CacheConfig::default());

    let store = Store::new();

    // Seed retention before serving; a failure here is survivable since
    // the first request will retry the fetch.
    match catalogue.fetch_pricelist().await {
        Ok(pricelist) => {
            info!(
                snapshot = pricelist.id(),
                legs = pricelist.legs().len(),
                offers = pricelist.offer_count(),
                "loaded initial pricelist"
            );
            store.insert_pricelist((*pricelist).clone()).await;
        }
        Err(e) => {
            warn!(error = %e, "initial pricelist fetch failed, will retry on demand");
        }
    }

    // Poll for new snapshots so retention advances even when no requests
    // arrive.
    let refresh_catalogue = catalogue.client().clone();
    let refresh_store = store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRICELIST_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_catalogue.fetch_pricelist().await {
                Ok(pricelist) => {
                    refresh_store.insert_pricelist(pricelist).await;
                }
                Err(e) => error!(error = %e, "pricelist refresh failed"),
            }
        }
    });

    let state = AppState::new(catalogue, store, SearchLimits::default());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Cosmos itinerary server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
