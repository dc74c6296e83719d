//! Interplanetary itinerary server.
//!
//! A web service that answers: "how do I get from this planet to that
//! one, and which combination of carrier offers is cheapest or fastest?"

pub mod cache;
pub mod catalogue;
pub mod domain;
pub mod search;
pub mod store;
pub mod web;
