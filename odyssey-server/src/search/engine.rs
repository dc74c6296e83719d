//! Itinerary search: enumerate paths, optimize each, rank the results.
//!
//! This is the one entry point the web layer calls. Everything below it is
//! pure: the caller hands over a leg snapshot and gets back ranked
//! itineraries plus exploration counters.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Leg, Path, Planet, Selection};

use super::config::SearchLimits;
use super::enumerate::find_all_paths;
use super::metrics::{RouteMetrics, route_metrics};
use super::optimize::{Objective, best_combination, objective_value};

/// A search request: where from, where to, and what to optimize for.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub from: Planet,
    pub to: Planet,
    pub objective: Objective,

    /// Restrict offers to these carriers; `None` admits every carrier.
    pub carriers: Option<HashSet<String>>,
}

/// One ranked itinerary: a path, its best offer per leg, and totals.
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub path: Path,
    pub selection: Selection,
    pub metrics: RouteMetrics,

    /// The value the ranking sorted by (total price or door-to-door hours).
    pub objective_value: f64,
}

/// The outcome of one search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Itineraries in ascending objective order. Ties keep path
    /// enumeration order.
    pub itineraries: Vec<Itinerary>,

    /// Paths the enumerator produced.
    pub paths_considered: usize,

    /// Total candidate offers the optimizer examined across all paths.
    pub steps: u64,

    /// True when any budget cut the search short; the results are then a
    /// best effort, not exhaustive.
    pub truncated: bool,
}

/// Run a full search over `legs`.
///
/// Unknown planets are not an error: they simply yield no paths and an
/// empty result.
pub fn search(legs: &[Arc<Leg>], request: &SearchRequest, limits: &SearchLimits) -> SearchResult {
    let enumerated = find_all_paths(legs, &request.from, &request.to, limits.max_paths);
    let paths_considered = enumerated.paths.len();
    let mut truncated = enumerated.truncated;

    // One wall-clock deadline shared by every per-path combination search.
    let deadline = limits.deadline();

    let mut steps: u64 = 0;
    let mut itineraries: Vec<Itinerary> = Vec::new();

    for path in enumerated.paths {
        let outcome = best_combination(
            &path,
            request.objective,
            request.carriers.as_ref(),
            limits,
            deadline,
        );
        steps += outcome.steps;
        truncated |= outcome.truncated;

        let Some(selection) = outcome.selection else {
            debug!(
                from = %path.origin(),
                to = %path.destination(),
                hops = path.hops(),
                "no feasible offer combination for path"
            );
            continue;
        };

        // Complete by construction, so the value always exists.
        let Some(value) = objective_value(&selection, request.objective) else {
            continue;
        };

        let metrics = route_metrics(&path, &selection);
        itineraries.push(Itinerary {
            path,
            selection,
            metrics,
            objective_value: value,
        });
    }

    itineraries.sort_by(|a, b| a.objective_value.total_cmp(&b.objective_value));

    info!(
        from = %request.from,
        to = %request.to,
        objective = request.objective.as_str(),
        paths_considered,
        itineraries = itineraries.len(),
        steps,
        truncated,
        "search complete"
    );

    SearchResult {
        itineraries,
        paths_considered,
        steps,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Offer, parse_instant};

    fn planet(name: &str) -> Planet {
        Planet::new(name).unwrap()
    }

    fn offer(id: &str, carrier: &str, price: f64, dep: &str, arr: &str) -> Offer {
        Offer::new(
            id,
            carrier,
            price,
            parse_instant(dep).unwrap(),
            parse_instant(arr).unwrap(),
        )
    }

    fn leg(id: &str, from: &str, to: &str, offers: Vec<Offer>) -> Arc<Leg> {
        Arc::new(Leg::new(id, planet(from), planet(to), 1000.0, offers).unwrap())
    }

    fn request(from: &str, to: &str, objective: Objective) -> SearchRequest {
        SearchRequest {
            from: planet(from),
            to: planet(to),
            objective,
            carriers: None,
        }
    }

    /// Earth -> Mars directly, and Earth -> Venus -> Mars with a cheap
    /// pair of connecting offers.
    fn sample_legs() -> Vec<Arc<Leg>> {
        vec![
            leg(
                "l1",
                "Earth",
                "Mars",
                vec![offer("direct", "A", 500.0, "2024-03-15T08:00:00Z", "2024-03-15T12:00:00Z")],
            ),
            leg(
                "l2",
                "Earth",
                "Venus",
                vec![offer("hop1", "B", 100.0, "2024-03-15T08:00:00Z", "2024-03-15T10:00:00Z")],
            ),
            leg(
                "l3",
                "Venus",
                "Mars",
                vec![offer("hop2", "B", 150.0, "2024-03-15T12:00:00Z", "2024-03-15T16:00:00Z")],
            ),
        ]
    }

    #[test]
    fn cheapest_ranks_connection_above_direct() {
        let legs = sample_legs();
        let result = search(
            &legs,
            &request("Earth", "Mars", Objective::Cheapest),
            &SearchLimits::default(),
        );

        assert_eq!(result.paths_considered, 2);
        assert_eq!(result.itineraries.len(), 2);
        assert!(!result.truncated);

        // 250 via Venus beats 500 direct.
        assert_eq!(result.itineraries[0].objective_value, 250.0);
        assert_eq!(result.itineraries[0].path.hops(), 2);
        assert_eq!(result.itineraries[1].objective_value, 500.0);
    }

    #[test]
    fn fastest_ranks_direct_above_connection() {
        let legs = sample_legs();
        let result = search(
            &legs,
            &request("Earth", "Mars", Objective::Fastest),
            &SearchLimits::default(),
        );

        // 4h direct vs 8h door to door via Venus.
        assert_eq!(result.itineraries[0].objective_value, 4.0);
        assert_eq!(result.itineraries[0].path.hops(), 1);
    }

    #[test]
    fn unknown_planet_yields_empty_result() {
        let legs = sample_legs();
        let result = search(
            &legs,
            &request("Pluto", "Mars", Objective::Cheapest),
            &SearchLimits::default(),
        );

        assert!(result.itineraries.is_empty());
        assert_eq!(result.paths_considered, 0);
        assert!(!result.truncated);
    }

    #[test]
    fn infeasible_paths_are_dropped_not_errored() {
        // The connection via Venus has a 30-minute layover: infeasible.
        let legs = vec![
            leg(
                "l1",
                "Earth",
                "Mars",
                vec![offer("direct", "A", 500.0, "2024-03-15T08:00:00Z", "2024-03-15T12:00:00Z")],
            ),
            leg(
                "l2",
                "Earth",
                "Venus",
                vec![offer("hop1", "B", 100.0, "2024-03-15T08:00:00Z", "2024-03-15T10:00:00Z")],
            ),
            leg(
                "l3",
                "Venus",
                "Mars",
                vec![offer("hop2", "B", 150.0, "2024-03-15T10:30:00Z", "2024-03-15T16:00:00Z")],
            ),
        ];

        let result = search(
            &legs,
            &request("Earth", "Mars", Objective::Cheapest),
            &SearchLimits::default(),
        );

        assert_eq!(result.paths_considered, 2);
        assert_eq!(result.itineraries.len(), 1);
        assert_eq!(result.itineraries[0].selection.slot(0).unwrap().id, "direct");
    }

    #[test]
    fn carrier_filter_narrows_results() {
        let legs = sample_legs();
        let mut req = request("Earth", "Mars", Objective::Cheapest);
        req.carriers = Some(["A".to_string()].into());

        let result = search(&legs, &req, &SearchLimits::default());
        assert_eq!(result.itineraries.len(), 1);
        assert_eq!(result.itineraries[0].selection.slot(0).unwrap().carrier, "A");
    }

    #[test]
    fn metrics_accompany_each_itinerary() {
        let legs = sample_legs();
        let result = search(
            &legs,
            &request("Earth", "Mars", Objective::Cheapest),
            &SearchLimits::default(),
        );

        let via_venus = &result.itineraries[0];
        assert_eq!(via_venus.metrics.price, 250.0);
        assert_eq!(via_venus.metrics.distance_km, 2000.0);
        // 2h + 4h of flight time, layover excluded.
        assert_eq!(via_venus.metrics.hours, 6);
    }

    #[test]
    fn tie_keeps_enumeration_order() {
        // Two direct legs with equal cheapest offers; lexicographic
        // enumeration is by destination so both paths tie on price and
        // the earlier-enumerated one leads.
        let legs = vec![
            leg(
                "l1",
                "Earth",
                "Mars",
                vec![
                    offer("a", "A", 100.0, "2024-03-15T08:00:00Z", "2024-03-15T12:00:00Z"),
                    offer("b", "B", 100.0, "2024-03-15T09:00:00Z", "2024-03-15T13:00:00Z"),
                ],
            ),
        ];

        let result = search(
            &legs,
            &request("Earth", "Mars", Objective::Cheapest),
            &SearchLimits::default(),
        );
        assert_eq!(result.itineraries.len(), 1);
        // First-found offer wins the in-path tie.
        assert_eq!(result.itineraries[0].selection.slot(0).unwrap().id, "a");
    }

    #[test]
    fn step_budget_marks_result_truncated() {
        let offers: Vec<Offer> = (0..50)
            .map(|i| {
                offer(
                    &format!("o{i}"),
                    "A",
                    100.0,
                    "2024-03-15T08:00:00Z",
                    "2024-03-15T12:00:00Z",
                )
            })
            .collect();
        let legs = vec![leg("l1", "Earth", "Mars", offers)];

        let limits = SearchLimits::new(10, 100, None);
        let result = search(
            &legs,
            &request("Earth", "Mars", Objective::Cheapest),
            &limits,
        );

        assert!(result.truncated);
    }

    #[test]
    fn exhausted_time_budget_truncates_every_path() {
        let legs = sample_legs();

        // A zero-millisecond budget expires before the first candidate.
        let limits = SearchLimits::new(1_000_000, 10_000, Some(0));
        let result = search(&legs, &request("Earth", "Mars", Objective::Cheapest), &limits);

        assert!(result.truncated);
        assert!(result.itineraries.is_empty());
        // One aborted candidate per enumerated path, nothing more.
        assert_eq!(result.steps, result.paths_considered as u64);
    }
}
