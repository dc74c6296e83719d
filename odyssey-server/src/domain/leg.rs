//! Travel leg type.
//!
//! A `Leg` is one directed route between two planets, carrying the
//! competing carrier offers for flying it. Legs are wrapped in `Arc` for
//! cheap cloning during path enumeration.

use super::{DomainError, Offer, Planet};

/// A directed route between two planets with its competing offers.
///
/// The distance is validated at construction so metric sums never see a
/// NaN or negative contribution. Offers are kept in catalogue order; that
/// order is the tie-break when two offers score equally.
///
/// # Examples
///
/// ```
/// use odyssey_server::domain::{Leg, Planet};
///
/// let earth = Planet::new("Earth").unwrap();
/// let mars = Planet::new("Mars").unwrap();
///
/// let leg = Leg::new("leg-1", earth.clone(), mars.clone(), 56_000_000.0, vec![]).unwrap();
/// assert_eq!(leg.from(), &earth);
/// assert_eq!(leg.to(), &mars);
///
/// // Distances must be finite and non-negative
/// assert!(Leg::new("leg-2", earth, mars, f64::NAN, vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    id: String,
    from: Planet,
    to: Planet,
    distance_km: f64,
    offers: Vec<Offer>,
}

impl Leg {
    /// Construct a leg, validating the distance.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `distance_km` is NaN, infinite, or negative.
    pub fn new(
        id: impl Into<String>,
        from: Planet,
        to: Planet,
        distance_km: f64,
        offers: Vec<Offer>,
    ) -> Result<Self, DomainError> {
        if !distance_km.is_finite() {
            return Err(DomainError::InvalidLeg("distance must be finite"));
        }
        if distance_km < 0.0 {
            return Err(DomainError::InvalidLeg("distance must be non-negative"));
        }

        Ok(Leg {
            id: id.into(),
            from,
            to,
            distance_km,
            offers,
        })
    }

    /// Returns the catalogue-assigned identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the origin planet.
    pub fn from(&self) -> &Planet {
        &self.from
    }

    /// Returns the destination planet.
    pub fn to(&self) -> &Planet {
        &self.to
    }

    /// Returns the leg distance in kilometres.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Returns the offers for this leg in catalogue order.
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Look up an offer on this leg by its identifier.
    pub fn offer_by_id(&self, id: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.id == id)
    }
}
