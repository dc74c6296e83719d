//! Route aggregation: totals, coverage segments, and removal previews.
//!
//! These are the read-side companions to the optimizer: given a path and a
//! selection they summarize what the traveller has actually picked.
//! Malformed offers (arrival not after departure) contribute nothing to
//! any total, and the whole leg is skipped with them so distance totals
//! never count a leg nobody can fly.

use crate::domain::{Path, Planet, Selection, hours_between};

use super::validate::{ConnectionError, validate_connections};

/// Aggregate totals for the chosen offers of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    /// Sum of leg distances with a chosen, well-formed offer.
    pub distance_km: f64,

    /// Total flight time in whole hours, rounded down. Layovers are not
    /// counted.
    pub hours: i64,

    /// Sum of chosen offer prices.
    pub price: f64,
}

/// One hop of route coverage, as shown to the traveller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSegment {
    pub from: Planet,
    pub to: Planet,

    /// True when this span is unserved and must still be filled.
    pub gap: bool,
}

/// The effect of clearing one slot of a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalPreview {
    /// The selection after the removal.
    pub selection: Selection,

    /// Whether what remains still forms a viable partial route.
    pub validation: Result<(), ConnectionError>,

    /// Coverage after the removal, gaps included.
    pub segments: Vec<RouteSegment>,
}

/// Sum distance, flight hours, and price over the chosen offers.
///
/// A leg contributes only when its slot is set and the offer is
/// chronological; otherwise the leg is skipped entirely, distance
/// included. The hour total is floored to whole hours for display.
pub fn route_metrics(path: &Path, selection: &Selection) -> RouteMetrics {
    let mut distance_km = 0.0;
    let mut flight_hours = 0.0;
    let mut price = 0.0;

    for (index, leg) in path.legs().iter().enumerate() {
        let Some(offer) = selection.slot(index) else {
            continue;
        };
        if !offer.is_chronological() {
            continue;
        }

        distance_km += leg.distance_km();
        flight_hours += hours_between(offer.departure, offer.arrival);
        price += offer.price;
    }

    RouteMetrics {
        distance_km,
        hours: flight_hours.floor() as i64,
        price,
    }
}

/// Describe route coverage as served and gap segments.
///
/// Legs with a chosen offer appear as ordinary segments. A run of unserved
/// legs after the first chosen one collapses into gap segments bridging
/// from the previous segment's endpoint. Unserved legs before any chosen
/// offer produce nothing.
pub fn route_gap(path: &Path, selection: &Selection) -> Vec<RouteSegment> {
    let mut segments: Vec<RouteSegment> = Vec::new();
    let mut started = false;

    for (index, leg) in path.legs().iter().enumerate() {
        if selection.slot(index).is_some() {
            started = true;
            segments.push(RouteSegment {
                from: leg.from().clone(),
                to: leg.to().clone(),
                gap: false,
            });
        } else if started {
            // Bridge from wherever coverage last ended.
            let from = segments
                .last()
                .map(|s| s.to.clone())
                .unwrap_or_else(|| leg.from().clone());
            segments.push(RouteSegment {
                from,
                to: leg.to().clone(),
                gap: true,
            });
        }
    }

    segments
}

/// Preview what clearing slot `index` does to a selection.
///
/// The removal is applied to a copy; clearing an out-of-range index
/// changes nothing but the preview is still computed. Validation allows
/// leading and trailing holes since the traveller is mid-edit.
pub fn preview_removal(path: &Path, selection: &Selection, index: usize) -> RemovalPreview {
    let mut after = selection.clone();
    after.clear(index);

    let validation = validate_connections(&after, true);
    let segments = route_gap(path, &after);

    RemovalPreview {
        selection: after,
        validation,
        segments,
    }
}
