//! Conversion from catalogue DTOs to domain types.
//!
//! The upstream occasionally ships malformed entries: providers whose
//! timestamps do not parse, legs without route info. Those are skipped
//! with a warning rather than failing the whole snapshot; only a snapshot
//! that is unusable as a whole (bad `validUntil`) is an error.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{Leg, Offer, Planet, Pricelist, parse_instant};

use super::error::CatalogueError;
use super::types::{LegDto, ProviderDto, TravelPricesDto};

/// Convert a TravelPrices payload into a domain pricelist.
///
/// # Errors
///
/// Returns `CatalogueError::Invalid` when the snapshot-level `validUntil`
/// does not parse. Per-leg and per-offer problems are logged and skipped.
pub fn convert_pricelist(dto: TravelPricesDto) -> Result<Pricelist, CatalogueError> {
    let valid_until = parse_instant(&dto.valid_until).map_err(|_| {
        CatalogueError::Invalid(format!("unparseable validUntil: {:?}", dto.valid_until))
    })?;

    let leg_dtos = dto.legs.unwrap_or_default();
    let mut legs = Vec::with_capacity(leg_dtos.len());

    for leg_dto in leg_dtos {
        match convert_leg(&leg_dto) {
            Some(leg) => legs.push(Arc::new(leg)),
            None => {
                warn!(pricelist = %dto.id, leg = %leg_dto.id, "skipping malformed leg");
            }
        }
    }

    Ok(Pricelist::new(dto.id, valid_until, legs))
}

/// Convert one leg, or `None` when it cannot be used.
fn convert_leg(dto: &LegDto) -> Option<Leg> {
    let route = dto.route_info.as_ref()?;
    let from = Planet::new(&route.from.name).ok()?;
    let to = Planet::new(&route.to.name).ok()?;

    let provider_dtos = dto.providers.as_deref().unwrap_or(&[]);
    let mut offers = Vec::with_capacity(provider_dtos.len());
    for provider in provider_dtos {
        match convert_offer(provider) {
            Some(offer) => offers.push(offer),
            None => {
                warn!(leg = %dto.id, offer = %provider.id, "skipping malformed offer");
            }
        }
    }

    Leg::new(dto.id.clone(), from, to, route.distance, offers).ok()
}

/// Convert one provider offer, or `None` when its timestamps are garbage.
fn convert_offer(dto: &ProviderDto) -> Option<Offer> {
    let departure = parse_instant(&dto.flight_start).ok()?;
    let arrival = parse_instant(&dto.flight_end).ok()?;

    Some(Offer::new(
        dto.id.clone(),
        dto.company.name.clone(),
        dto.price,
        departure,
        arrival,
    ))
}
