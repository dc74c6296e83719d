//! Web layer for the itinerary server.
//!
//! Provides the JSON HTTP API over the search engine, catalogue, and
//! booking store.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
