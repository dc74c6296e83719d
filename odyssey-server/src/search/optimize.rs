//! Best offer-combination search for one path.
//!
//! Given a path and an objective, searches the cartesian product of each
//! leg's offers for the feasible combination that minimizes the objective.
//! Feasibility follows the connecting-flight rules: strictly ordered
//! flights with a layover of 1 to 48 hours between each pair. Candidates
//! violating a rule are skipped outright during the walk, which keeps the
//! search space small; the search stays exhaustive over what remains, so
//! the returned combination is optimal, not merely good.

use std::collections::HashSet;
use std::str::FromStr;
use std::time::Instant;

use tracing::{debug, warn};

use crate::domain::{Offer, Path, Selection, hours_between};

use super::config::SearchLimits;
use super::validate::{MAX_LAYOVER_HOURS, MIN_LAYOVER_HOURS};

/// What the combination search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Minimize total price across all legs.
    Cheapest,

    /// Minimize elapsed time from first departure to last arrival.
    Fastest,
}

/// Error for an unrecognized objective name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown objective: {0:?} (expected \"cheapest\" or \"fastest\")")]
pub struct ParseObjectiveError(String);

impl FromStr for Objective {
    type Err = ParseObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cheapest" => Ok(Objective::Cheapest),
            "fastest" => Ok(Objective::Fastest),
            other => Err(ParseObjectiveError(other.to_string())),
        }
    }
}

impl Objective {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Cheapest => "cheapest",
            Objective::Fastest => "fastest",
        }
    }
}

/// Outcome of one combination search.
#[derive(Debug, Clone)]
pub struct CombinationResult {
    /// The best feasible selection, or `None` when no complete valid
    /// assignment exists.
    pub selection: Option<Selection>,

    /// Candidate offers examined.
    pub steps: u64,

    /// True when the step or time budget stopped the search early; the
    /// selection is then the best found so far, not necessarily optimal.
    pub truncated: bool,
}

/// The objective value of a complete selection.
///
/// For `Fastest` this is the span from the first departure to the last
/// arrival, layovers included; for `Cheapest` the sum of prices. Returns
/// `None` for selections with any empty slot.
pub fn objective_value(selection: &Selection, objective: Objective) -> Option<f64> {
    if selection.chosen_count() < selection.len() || selection.is_empty() {
        return None;
    }

    match objective {
        Objective::Fastest => {
            let first = selection.slot(0)?;
            let last = selection.slot(selection.len() - 1)?;
            Some(hours_between(first.departure, last.arrival))
        }
        Objective::Cheapest => {
            Some(selection.chosen().map(|(_, offer)| offer.price).sum())
        }
    }
}

/// Find the feasible offer combination for `path` minimizing `objective`.
///
/// `allowed_carriers` of `None` admits every carrier. Non-chronological
/// offers and offers from other carriers never participate. Ties go to
/// the first combination found, which for a single leg means the earliest
/// offer in catalogue order.
///
/// The walk is iterative with an explicit stack of (leg, offer-cursor)
/// frames rather than recursive, and charges one step per candidate offer
/// examined against `limits`. The `deadline`, when set, aborts the walk
/// once it passes; callers searching many paths derive it once so every
/// path draws on the same wall-clock budget.
pub fn best_combination(
    path: &Path,
    objective: Objective,
    allowed_carriers: Option<&HashSet<String>>,
    limits: &SearchLimits,
    deadline: Option<Instant>,
) -> CombinationResult {
    let legs = path.legs();

    let mut steps: u64 = 0;
    let mut truncated = false;

    let mut best: Option<(f64, Vec<Offer>)> = None;

    // Frame per leg: which offer to try next.
    let mut cursors: Vec<usize> = vec![0];
    let mut chosen: Vec<Offer> = Vec::with_capacity(legs.len());

    'walk: while !cursors.is_empty() {
        let leg_index = cursors.len() - 1;
        let offers = legs[leg_index].offers();
        let cursor = &mut cursors[leg_index];

        while *cursor < offers.len() {
            let candidate = &offers[*cursor];
            *cursor += 1;

            steps += 1;
            if steps > limits.max_steps
                || deadline.is_some_and(|d| Instant::now() >= d)
            {
                truncated = true;
                break 'walk;
            }

            if !candidate.is_chronological() {
                continue;
            }
            if let Some(allowed) = allowed_carriers {
                if !allowed.contains(&candidate.carrier) {
                    continue;
                }
            }

            if let Some(first) = chosen.first() {
                // Preserved pruning rule: no leg may depart before the
                // journey's first departure.
                if candidate.departure < first.departure {
                    continue;
                }
            }
            if let Some(previous) = chosen.last() {
                if candidate.departure <= previous.arrival {
                    continue;
                }
                let wait = hours_between(previous.arrival, candidate.departure);
                if !(MIN_LAYOVER_HOURS..=MAX_LAYOVER_HOURS).contains(&wait) {
                    continue;
                }
            }

            chosen.push(candidate.clone());

            if chosen.len() == legs.len() {
                let metric = assignment_metric(&chosen, objective);
                // Strict improvement only; first-found wins ties.
                if best.as_ref().is_none_or(|(m, _)| metric < *m) {
                    best = Some((metric, chosen.clone()));
                }
                chosen.pop();
                continue;
            }

            cursors.push(0);
            continue 'walk;
        }

        cursors.pop();
        chosen.pop();
    }

    if truncated {
        warn!(
            hops = legs.len(),
            steps,
            objective = objective.as_str(),
            "combination search budget exhausted"
        );
    } else {
        debug!(
            hops = legs.len(),
            steps,
            found = best.is_some(),
            "combination search complete"
        );
    }

    CombinationResult {
        selection: best.map(|(_, offers)| {
            Selection::from_slots(offers.into_iter().map(Some).collect())
        }),
        steps,
        truncated,
    }
}

/// Objective metric for a complete, feasible assignment.
fn assignment_metric(offers: &[Offer], objective: Objective) -> f64 {
    match objective {
        Objective::Fastest => {
            // Non-empty: callers only score complete assignments.
            hours_between(offers[0].departure, offers[offers.len() - 1].arrival)
        }
        Objective::Cheapest => offers.iter().map(|o| o.price).sum(),
    }
}
