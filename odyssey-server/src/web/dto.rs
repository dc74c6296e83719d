//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Offer, Pricelist, Selection};
use crate::search::{Itinerary, RouteSegment, SearchResult};
use crate::store::{Booking, BookingSegment, StoreStats};

/// Request to search for itineraries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApiRequest {
    /// Origin planet name
    pub from: String,

    /// Destination planet name
    pub to: String,

    /// "cheapest" or "fastest"
    pub objective: String,

    /// Restrict offers to these carriers; absent means all carriers
    pub carriers: Option<Vec<String>>,
}

/// An offer in API responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDto {
    pub id: String,
    pub carrier: String,
    pub price: f64,

    /// RFC 3339 departure instant
    pub departure: String,

    /// RFC 3339 arrival instant
    pub arrival: String,
}

impl OfferDto {
    pub fn from_offer(offer: &Offer) -> Self {
        Self {
            id: offer.id.clone(),
            carrier: offer.carrier.clone(),
            price: offer.price,
            departure: offer.departure.to_rfc3339(),
            arrival: offer.arrival.to_rfc3339(),
        }
    }
}

/// One leg of an itinerary with its chosen offer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryLegDto {
    pub leg_id: String,
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub offer: OfferDto,
}

/// One ranked itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDto {
    pub legs: Vec<ItineraryLegDto>,
    pub total_price: f64,

    /// Flight hours, rounded down; layovers excluded
    pub total_hours: i64,
    pub total_distance_km: f64,

    /// The value the ranking sorted by
    pub objective_value: f64,
}

impl ItineraryDto {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let legs = itinerary
            .path
            .legs()
            .iter()
            .enumerate()
            .filter_map(|(i, leg)| {
                itinerary.selection.slot(i).map(|offer| ItineraryLegDto {
                    leg_id: leg.id().to_string(),
                    from: leg.from().as_str().to_string(),
                    to: leg.to().as_str().to_string(),
                    distance_km: leg.distance_km(),
                    offer: OfferDto::from_offer(offer),
                })
            })
            .collect();

        Self {
            legs,
            total_price: itinerary.metrics.price,
            total_hours: itinerary.metrics.hours,
            total_distance_km: itinerary.metrics.distance_km,
            objective_value: itinerary.objective_value,
        }
    }
}

/// Response for itinerary search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApiResponse {
    pub itineraries: Vec<ItineraryDto>,
    pub paths_considered: usize,
    pub steps: u64,
    pub truncated: bool,
}

impl SearchApiResponse {
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            itineraries: result
                .itineraries
                .iter()
                .map(ItineraryDto::from_itinerary)
                .collect(),
            paths_considered: result.paths_considered,
            steps: result.steps,
            truncated: result.truncated,
        }
    }
}

/// Response listing planets and carriers for pickers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetsResponse {
    pub planets: Vec<String>,
    pub carriers: Vec<String>,
}

impl PlanetsResponse {
    pub fn from_pricelist(pricelist: &Pricelist) -> Self {
        Self {
            planets: pricelist
                .planet_names()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            carriers: pricelist.carrier_names(),
        }
    }
}

/// Summary of the active pricelist snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricelistResponse {
    pub id: String,
    pub valid_until: String,
    pub leg_count: usize,
    pub offer_count: usize,
}

impl PricelistResponse {
    pub fn from_pricelist(pricelist: &Pricelist) -> Self {
        Self {
            id: pricelist.id().to_string(),
            valid_until: pricelist.valid_until().to_rfc3339(),
            leg_count: pricelist.legs().len(),
            offer_count: pricelist.offer_count(),
        }
    }
}

/// Request to preview removing one chosen offer from a route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapPreviewRequest {
    /// Leg ids of the route, in travel order
    pub leg_ids: Vec<String>,

    /// Chosen offer id per leg; `null` for an unfilled slot
    pub offer_ids: Vec<Option<String>>,

    /// Slot to clear
    pub remove_index: usize,
}

/// One coverage segment in a gap preview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDto {
    pub from: String,
    pub to: String,
    pub gap: bool,
}

impl SegmentDto {
    pub fn from_segment(segment: &RouteSegment) -> Self {
        Self {
            from: segment.from.as_str().to_string(),
            to: segment.to.as_str().to_string(),
            gap: segment.gap,
        }
    }
}

/// Response for a gap preview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapPreviewResponse {
    /// Whether the remaining selection is still viable as a partial route
    pub valid: bool,

    /// Human-readable problem when not valid
    pub error: Option<String>,

    /// Remaining offer id per slot after the removal
    pub offer_ids: Vec<Option<String>>,

    /// Coverage after the removal, gaps included
    pub segments: Vec<SegmentDto>,
}

impl GapPreviewResponse {
    pub fn new(
        selection: &Selection,
        validation: Result<(), impl std::fmt::Display>,
        segments: &[RouteSegment],
    ) -> Self {
        let (valid, error) = match validation {
            Ok(()) => (true, None),
            Err(e) => (false, Some(e.to_string())),
        };

        Self {
            valid,
            error,
            offer_ids: selection
                .slots()
                .iter()
                .map(|s| s.as_ref().map(|o| o.id.clone()))
                .collect(),
            segments: segments.iter().map(SegmentDto::from_segment).collect(),
        }
    }
}

/// Request to book a route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub first_name: String,
    pub last_name: String,

    /// Leg ids of the route, in travel order
    pub leg_ids: Vec<String>,

    /// Chosen offer id per leg; every slot must be filled to book
    pub offer_ids: Vec<String>,
}

/// Request to change a booking's passenger details. Absent fields keep
/// their current value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Query parameters for listing bookings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One flown hop of a booking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSegmentDto {
    pub from: String,
    pub to: String,
    pub carrier: String,
    pub price: f64,
    pub departure: String,
    pub arrival: String,
}

impl BookingSegmentDto {
    pub fn from_segment(segment: &BookingSegment) -> Self {
        Self {
            from: segment.from.clone(),
            to: segment.to.clone(),
            carrier: segment.carrier.clone(),
            price: segment.price,
            departure: segment.departure.to_rfc3339(),
            arrival: segment.arrival.to_rfc3339(),
        }
    }
}

/// A booking in API responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub pricelist_id: String,
    pub first_name: String,
    pub last_name: String,
    pub segments: Vec<BookingSegmentDto>,
    pub total_price: f64,
    pub total_hours: i64,
    pub total_distance_km: f64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl BookingDto {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            id: booking.id.clone(),
            pricelist_id: booking.pricelist_id.clone(),
            first_name: booking.first_name.clone(),
            last_name: booking.last_name.clone(),
            segments: booking
                .segments
                .iter()
                .map(BookingSegmentDto::from_segment)
                .collect(),
            total_price: booking.total_price,
            total_hours: booking.total_hours,
            total_distance_km: booking.total_distance_km,
            created_at: booking.created_at.to_rfc3339(),
            updated_at: booking.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response listing bookings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub bookings: Vec<BookingDto>,
}

/// Store counters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub active_pricelists: usize,
    pub total_bookings: usize,
    pub unique_passengers: usize,
    pub last_updated: String,
}

impl StatsResponse {
    pub fn from_stats(stats: &StoreStats) -> Self {
        Self {
            active_pricelists: stats.active_pricelists,
            total_bookings: stats.total_bookings,
            unique_passengers: stats.unique_passengers,
            last_updated: stats.last_updated.to_rfc3339(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
