//! Pricing snapshot type.
//!
//! A `Pricelist` is one immutable snapshot of the catalogue: every leg and
//! offer available for sale until the snapshot's validity deadline. All
//! searching happens against exactly one pricelist.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{Leg, Planet};

/// One immutable catalogue snapshot.
#[derive(Debug, Clone)]
pub struct Pricelist {
    id: String,
    valid_until: DateTime<Utc>,
    legs: Vec<Arc<Leg>>,
}

impl Pricelist {
    /// Create a pricelist from already-converted legs.
    pub fn new(id: impl Into<String>, valid_until: DateTime<Utc>, legs: Vec<Arc<Leg>>) -> Self {
        Self {
            id: id.into(),
            valid_until,
            legs,
        }
    }

    /// Returns the upstream-assigned snapshot identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the instant this snapshot stops being sellable.
    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    /// Returns all legs in catalogue order.
    pub fn legs(&self) -> &[Arc<Leg>] {
        &self.legs
    }

    /// True when the snapshot's validity deadline has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until <= now
    }

    /// Look up a leg by its identifier.
    pub fn leg_by_id(&self, id: &str) -> Option<&Arc<Leg>> {
        self.legs.iter().find(|l| l.id() == id)
    }

    /// Distinct planet names appearing as any leg endpoint, sorted.
    ///
    /// Drives origin/destination pickers.
    pub fn planet_names(&self) -> Vec<Planet> {
        let mut names = BTreeSet::new();
        for leg in &self.legs {
            names.insert(leg.from().clone());
            names.insert(leg.to().clone());
        }
        names.into_iter().collect()
    }

    /// Distinct carrier names across all offers, sorted.
    ///
    /// Drives carrier-filter pickers.
    pub fn carrier_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for leg in &self.legs {
            for offer in leg.offers() {
                names.insert(offer.carrier.clone());
            }
        }
        names.into_iter().collect()
    }

    /// Total number of offers across all legs.
    pub fn offer_count(&self) -> usize {
        self.legs.iter().map(|l| l.offers().len()).sum()
    }
}
