//! Catalogue API response DTOs.
//!
//! These types map directly to the TravelPrices JSON payload. They use
//! `Option` liberally because the upstream occasionally ships legs with
//! missing route info or provider lists; conversion decides what to do
//! about those.

use serde::Deserialize;

/// The whole TravelPrices response: one pricelist snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPricesDto {
    /// Upstream snapshot identifier.
    pub id: String,

    /// ISO 8601 instant after which this snapshot is no longer sellable.
    pub valid_until: String,

    /// Travel legs in catalogue order.
    pub legs: Option<Vec<LegDto>>,
}

/// One travel leg with its competing provider offers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub id: String,

    /// Route endpoints and distance. Absent on malformed entries.
    pub route_info: Option<RouteInfoDto>,

    /// Provider offers for flying this leg.
    pub providers: Option<Vec<ProviderDto>>,
}

/// Route endpoints and distance for a leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfoDto {
    pub id: String,
    pub from: PlanetDto,
    pub to: PlanetDto,

    /// Distance in kilometres.
    pub distance: f64,
}

/// A planet as the catalogue names it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetDto {
    pub id: String,
    pub name: String,
}

/// One provider offer on a leg.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDto {
    pub id: String,
    pub company: CompanyDto,
    pub price: f64,

    /// ISO 8601 departure instant.
    pub flight_start: String,

    /// ISO 8601 arrival instant.
    pub flight_end: String,
}

/// The carrier selling an offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: String,
    pub name: String,
}
