//! Domain types for the itinerary search engine.
//!
//! This module contains the core domain model: planets, legs, offers,
//! paths, selections, and pricing snapshots. Types with invariants enforce
//! them at construction time, so code that receives these types can trust
//! their validity.

mod error;
mod leg;
mod offer;
mod path;
mod planet;
mod pricelist;
mod selection;
mod time;

pub use error::DomainError;
pub use leg::Leg;
pub use offer::Offer;
pub use path::{Path, PathKey};
pub use planet::{InvalidPlanet, Planet};
pub use pricelist::Pricelist;
pub use selection::Selection;
pub use time::{TimeError, hours_between, parse_instant};
