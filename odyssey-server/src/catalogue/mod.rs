//! Catalogue pricing API integration.
//!
//! Client, DTOs, and conversion to domain types for the TravelPrices
//! endpoint, plus a file-backed source for offline development.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{CatalogueClient, CatalogueConfig};
pub use convert::convert_pricelist;
pub use error::CatalogueError;
pub use mock::FileCatalogue;
pub use types::{CompanyDto, LegDto, PlanetDto, ProviderDto, RouteInfoDto, TravelPricesDto};
