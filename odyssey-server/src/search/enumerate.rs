//! Route enumeration over one catalogue snapshot.
//!
//! Builds an adjacency map from the snapshot's legs and walks it
//! depth-first to produce every simple path between two planets, up to the
//! hop bound. Offers and prices play no part here; this stage is purely
//! topological, and its output feeds the combination optimizer.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Leg, Path, PathKey, Planet};

/// Maximum number of legs in one enumerated path.
pub const MAX_HOPS: usize = 4;

/// Paths found by [`find_all_paths`], plus whether the collection cap cut
/// the enumeration short.
#[derive(Debug, Clone)]
pub struct EnumeratedPaths {
    /// Distinct paths in discovery order.
    pub paths: Vec<Path>,

    /// True when `max_paths` stopped the walk before it finished.
    pub truncated: bool,
}

/// DFS frame: a node plus the outgoing legs not yet tried from it.
struct Frame {
    legs: Vec<Arc<Leg>>,
    next: usize,
}

/// Enumerate every simple path from `from` to `to`, bounded by
/// [`MAX_HOPS`] legs and capped at `max_paths` results.
///
/// Outgoing legs at each node are tried in ascending order of destination
/// name, so the output order is deterministic for identical input. A
/// planet is never revisited within one path, and two paths with the same
/// ordered (from, to) edge sequence count as one (duplicate catalogue
/// legs notwithstanding); only the first discovery is kept.
///
/// Reaching `to` yields the path and ends that branch; longer paths
/// through the destination are not explored.
pub fn find_all_paths(
    legs: &[Arc<Leg>],
    from: &Planet,
    to: &Planet,
    max_paths: usize,
) -> EnumeratedPaths {
    let adjacency = build_adjacency(legs);

    let mut paths = Vec::new();
    let mut seen: HashSet<PathKey> = HashSet::new();
    let mut truncated = false;

    // Explicit DFS stack; one frame per planet on the current path.
    let mut stack: Vec<Frame> = vec![Frame {
        legs: outgoing(&adjacency, from),
        next: 0,
    }];
    let mut trail: Vec<Arc<Leg>> = Vec::new();
    let mut visited: HashSet<Planet> = HashSet::new();
    visited.insert(from.clone());

    'walk: while let Some(frame) = stack.last_mut() {
        while frame.next < frame.legs.len() {
            let leg = frame.legs[frame.next].clone();
            frame.next += 1;

            if visited.contains(leg.to()) {
                continue;
            }

            trail.push(leg.clone());

            if leg.to() == to {
                // Paths on the trail are connected by construction.
                if let Ok(path) = Path::new(trail.clone()) {
                    if seen.insert(path.key()) {
                        paths.push(path);
                        if paths.len() >= max_paths {
                            truncated = true;
                            break 'walk;
                        }
                    }
                }
                trail.pop();
                continue;
            }

            if trail.len() >= MAX_HOPS {
                trail.pop();
                continue;
            }

            visited.insert(leg.to().clone());
            let next_legs = outgoing(&adjacency, leg.to());
            stack.push(Frame {
                legs: next_legs,
                next: 0,
            });
            continue 'walk;
        }

        // Exhausted this node; backtrack.
        stack.pop();
        if let Some(leg) = trail.pop() {
            visited.remove(leg.to());
        }
    }

    debug!(
        from = %from,
        to = %to,
        paths = paths.len(),
        truncated,
        "route enumeration complete"
    );

    EnumeratedPaths { paths, truncated }
}

/// Group legs by origin planet.
fn build_adjacency(legs: &[Arc<Leg>]) -> HashMap<Planet, Vec<Arc<Leg>>> {
    let mut adjacency: HashMap<Planet, Vec<Arc<Leg>>> = HashMap::new();
    for leg in legs {
        adjacency
            .entry(leg.from().clone())
            .or_default()
            .push(leg.clone());
    }
    adjacency
}

/// Outgoing legs from a planet, sorted by destination name.
fn outgoing(adjacency: &HashMap<Planet, Vec<Arc<Leg>>>, planet: &Planet) -> Vec<Arc<Leg>> {
    let mut legs = adjacency.get(planet).cloned().unwrap_or_default();
    legs.sort_by(|a, b| a.to().cmp(b.to()));
    legs
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const PLANETS: [&str; 6] = ["Earth", "Mars", "Jupiter", "Saturn", "Venus", "Mercury"];

    fn arbitrary_legs() -> impl Strategy<Value = Vec<Arc<Leg>>> {
        prop::collection::vec((0usize..6, 0usize..6), 1..20).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .filter(|(_, (f, t))| f != t)
                .map(|(i, (f, t))| {
                    Arc::new(
                        Leg::new(
                            format!("l{i}"),
                            Planet::new(PLANETS[f]).unwrap(),
                            Planet::new(PLANETS[t]).unwrap(),
                            1000.0,
                            vec![],
                        )
                        .unwrap(),
                    )
                })
                .collect()
        })
    }

    proptest! {
        /// Every path is simple, within the hop bound, and connects the
        /// requested endpoints; no duplicate edge sequences appear.
        #[test]
        fn paths_are_simple_bounded_and_distinct(
            legs in arbitrary_legs(),
            from in 0usize..6,
            to in 0usize..6,
        ) {
            let from = Planet::new(PLANETS[from]).unwrap();
            let to = Planet::new(PLANETS[to]).unwrap();
            let result = find_all_paths(&legs, &from, &to, 10_000);

            let mut keys = HashSet::new();
            for path in &result.paths {
                prop_assert!(path.hops() <= MAX_HOPS);
                prop_assert_eq!(path.origin(), &from);
                prop_assert_eq!(path.destination(), &to);

                let mut planets = vec![path.origin().clone()];
                planets.extend(path.legs().iter().map(|l| l.to().clone()));
                let distinct: HashSet<_> = planets.iter().cloned().collect();
                prop_assert_eq!(distinct.len(), planets.len());

                prop_assert!(keys.insert(path.key()));
            }
        }

        /// Enumeration is deterministic.
        #[test]
        fn enumeration_is_reproducible(
            legs in arbitrary_legs(),
            from in 0usize..6,
            to in 0usize..6,
        ) {
            let from = Planet::new(PLANETS[from]).unwrap();
            let to = Planet::new(PLANETS[to]).unwrap();

            let a = find_all_paths(&legs, &from, &to, 10_000);
            let b = find_all_paths(&legs, &from, &to, 10_000);

            let ka: Vec<_> = a.paths.iter().map(Path::key).collect();
            let kb: Vec<_> = b.paths.iter().map(Path::key).collect();
            prop_assert_eq!(ka, kb);
        }
    }
}
