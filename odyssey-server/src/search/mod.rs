//! The itinerary search engine.
//!
//! Pure code, no I/O: the web layer feeds it a pricelist snapshot and it
//! enumerates candidate paths, picks the best offer combination for each,
//! validates connections, and ranks the survivors.

mod config;
mod engine;
mod enumerate;
mod metrics;
mod optimize;
pub mod validate;

pub use config::SearchLimits;
pub use engine::{Itinerary, SearchRequest, SearchResult, search};
pub use enumerate::{EnumeratedPaths, MAX_HOPS, find_all_paths};
pub use metrics::{
    RemovalPreview, RouteMetrics, RouteSegment, preview_removal, route_gap, route_metrics,
};
pub use optimize::{
    CombinationResult, Objective, ParseObjectiveError, best_combination, objective_value,
};
pub use validate::{
    ConnectionError, MAX_LAYOVER_HOURS, MIN_LAYOVER_HOURS, SlotFitError, check_slot_fit,
    validate_connections,
};
