//! Carrier offer type.

use chrono::{DateTime, Utc};

use super::time::hours_between;

/// One carrier's priced, time-boxed service for a leg.
///
/// Offers arrive from the catalogue as-is and are deliberately not
/// validated at construction: a snapshot containing one nonsensical offer
/// must still be searchable, so search code filters on
/// [`Offer::is_chronological`] instead of failing. An offer whose arrival
/// does not come strictly after its departure is never selectable.
///
/// # Examples
///
/// ```
/// use odyssey_server::domain::{Offer, parse_instant};
///
/// let offer = Offer::new(
///     "of-1",
///     "Spacegenix",
///     120.0,
///     parse_instant("2024-03-15T08:00:00Z").unwrap(),
///     parse_instant("2024-03-15T12:00:00Z").unwrap(),
/// );
///
/// assert!(offer.is_chronological());
/// assert_eq!(offer.duration_hours(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    /// Catalogue-assigned identifier, opaque to the engine.
    pub id: String,

    /// Name of the company selling the offer.
    pub carrier: String,

    /// Price for the whole leg, in the catalogue's single currency.
    pub price: f64,

    /// Departure instant.
    pub departure: DateTime<Utc>,

    /// Arrival instant.
    pub arrival: DateTime<Utc>,
}

impl Offer {
    /// Create a new offer.
    pub fn new(
        id: impl Into<String>,
        carrier: impl Into<String>,
        price: f64,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            carrier: carrier.into(),
            price,
            departure,
            arrival,
        }
    }

    /// True when the arrival is strictly after the departure.
    ///
    /// Offers failing this are excluded from selection, never selected
    /// and never fatal.
    pub fn is_chronological(&self) -> bool {
        self.arrival > self.departure
    }

    /// Flight time in fractional hours; negative for non-chronological offers.
    pub fn duration_hours(&self) -> f64 {
        hours_between(self.departure, self.arrival)
    }
}
