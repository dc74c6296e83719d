//! Path type.
//!
//! A `Path` is an ordered, connected sequence of legs forming one candidate
//! route between two planets. Paths come out of route enumeration and are
//! consumed by the offer-combination search.

use std::sync::Arc;

use super::{DomainError, Leg, Planet};

/// An ordered sequence of connected legs.
///
/// Legs are shared via `Arc` so a path is cheap to build and clone while
/// enumerating routes over one catalogue snapshot.
///
/// # Invariants
///
/// - Contains at least one leg
/// - Consecutive legs connect: each leg's destination is the next leg's origin
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    legs: Vec<Arc<Leg>>,
}

/// Identity of a path for deduplication purposes: its ordered sequence of
/// (from, to) planet pairs.
///
/// Two paths with the same edge sequence are the same path even when they
/// were discovered through different search branches or are backed by
/// distinct duplicate legs in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathKey(Vec<(Planet, Planet)>);

impl Path {
    /// Construct a path, validating that the legs connect.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty or any leg's destination differs
    /// from the next leg's origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use odyssey_server::domain::{Leg, Path, Planet};
    ///
    /// let earth = Planet::new("Earth").unwrap();
    /// let mars = Planet::new("Mars").unwrap();
    /// let jupiter = Planet::new("Jupiter").unwrap();
    ///
    /// let a = Arc::new(Leg::new("l1", earth.clone(), mars.clone(), 1.0, vec![]).unwrap());
    /// let b = Arc::new(Leg::new("l2", mars.clone(), jupiter.clone(), 1.0, vec![]).unwrap());
    ///
    /// let path = Path::new(vec![a.clone(), b]).unwrap();
    /// assert_eq!(path.hops(), 2);
    /// assert_eq!(path.origin(), &earth);
    /// assert_eq!(path.destination(), &jupiter);
    ///
    /// // Disconnected legs are rejected
    /// let c = Arc::new(Leg::new("l3", earth.clone(), jupiter, 1.0, vec![]).unwrap());
    /// assert!(Path::new(vec![a, c]).is_err());
    /// ```
    pub fn new(legs: Vec<Arc<Leg>>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyPath);
        }

        for pair in legs.windows(2) {
            if pair[0].to() != pair[1].from() {
                return Err(DomainError::LegsNotConnected(
                    pair[0].to().clone(),
                    pair[1].from().clone(),
                ));
            }
        }

        Ok(Path { legs })
    }

    /// Returns the legs of this path in travel order.
    pub fn legs(&self) -> &[Arc<Leg>] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn hops(&self) -> usize {
        self.legs.len()
    }

    /// Returns the origin planet.
    pub fn origin(&self) -> &Planet {
        // Non-empty by construction
        self.legs[0].from()
    }

    /// Returns the final destination planet.
    pub fn destination(&self) -> &Planet {
        // Non-empty by construction
        self.legs[self.legs.len() - 1].to()
    }

    /// Returns this path's deduplication identity.
    pub fn key(&self) -> PathKey {
        PathKey(
            self.legs
                .iter()
                .map(|leg| (leg.from().clone(), leg.to().clone()))
                .collect(),
        )
    }
}
