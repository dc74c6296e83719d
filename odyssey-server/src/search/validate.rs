//! Connecting-flight validation.
//!
//! A selection of offers only makes a usable journey when consecutive
//! flights run in chronological order and leave a layover inside the
//! allowed window. The rules here are shared by the combination optimizer
//! (which prunes candidates that would fail them) and by callers that
//! validate user-assembled selections directly.

use crate::domain::{Offer, Selection, hours_between};

/// Minimum layover between consecutive flights, in hours.
pub const MIN_LAYOVER_HOURS: f64 = 1.0;

/// Maximum layover between consecutive flights, in hours.
pub const MAX_LAYOVER_HOURS: f64 = 48.0;

/// Why a selection fails connecting-flight validation.
///
/// The layover variants carry the offending wait already shaped for
/// display: short waits rounded to hundredths of an hour, long waits
/// floored to whole hours.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectionError {
    /// A slot is empty and partial selections were not allowed.
    #[error("incomplete route selection")]
    IncompleteSelection,

    /// An empty slot sits between two chosen offers.
    #[error("incomplete route: missing connection in the middle of the route")]
    InternalGap,

    /// A later flight departs at or before the previous flight's arrival.
    #[error("invalid flight sequence: the next flight starts before the previous flight ends")]
    OutOfSequence,

    /// Layover shorter than [`MIN_LAYOVER_HOURS`].
    #[error("not enough time between flights ({hours} hours), need at least 1 hour between flights")]
    LayoverTooShort { hours: f64 },

    /// Layover longer than [`MAX_LAYOVER_HOURS`].
    #[error("too much waiting time ({hours} hours), maximum wait time is 48 hours")]
    LayoverTooLong { hours: f64 },
}

/// Why a candidate offer cannot be placed into a selection slot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SlotFitError {
    /// The candidate's arrival is not after its departure.
    #[error("flight arrival must be after its departure")]
    NotChronological,

    /// Too little time between the previous selected flight and the candidate.
    #[error("not enough time after the previous flight ({hours} hours), need at least 1 hour between flights")]
    TooSoonAfterPrevious { hours: f64 },

    /// Too much time between the previous selected flight and the candidate.
    #[error("too much waiting time after the previous flight ({hours} hours), maximum wait time is 48 hours")]
    TooLongAfterPrevious { hours: f64 },

    /// Too little time between the candidate and the next selected flight.
    #[error("not enough time before the next flight ({hours} hours), need at least 1 hour between flights")]
    TooSoonBeforeNext { hours: f64 },

    /// Too much time between the candidate and the next selected flight.
    #[error("too much waiting time before the next flight ({hours} hours), maximum wait time is 48 hours")]
    TooLongBeforeNext { hours: f64 },
}

/// Check that a selection forms a chronologically feasible journey.
///
/// Empty and single-slot selections are always valid. With `allow_partial`
/// set, empty slots before the first and after the last chosen offer are
/// tolerated; an empty slot *between* chosen offers never is. Every adjacent
/// pair of chosen offers must depart strictly after the previous arrival
/// with a layover inside `[MIN_LAYOVER_HOURS, MAX_LAYOVER_HOURS]`.
///
/// Scans left to right and reports the first violation only.
///
/// # Examples
///
/// ```
/// use odyssey_server::domain::{Offer, Selection, parse_instant};
/// use odyssey_server::search::validate_connections;
///
/// let outbound = Offer::new(
///     "o1",
///     "Spacebus",
///     120.0,
///     parse_instant("2024-03-15T08:00:00Z").unwrap(),
///     parse_instant("2024-03-15T12:00:00Z").unwrap(),
/// );
/// let onward = Offer::new(
///     "o2",
///     "Spacebus",
///     80.0,
///     parse_instant("2024-03-15T14:00:00Z").unwrap(),
///     parse_instant("2024-03-15T18:00:00Z").unwrap(),
/// );
///
/// let selection = Selection::from_slots(vec![Some(outbound), Some(onward)]);
/// assert!(validate_connections(&selection, false).is_ok());
/// ```
pub fn validate_connections(
    selection: &Selection,
    allow_partial: bool,
) -> Result<(), ConnectionError> {
    if selection.len() <= 1 {
        return Ok(());
    }

    if !allow_partial && selection.chosen_count() < selection.len() {
        return Err(ConnectionError::IncompleteSelection);
    }

    let (first, last) = match (selection.first_chosen(), selection.last_chosen()) {
        (Some(first), Some(last)) => (first, last),
        // Nothing chosen at all: a multi-slot selection with no offers
        // cannot be judged connected.
        _ => return Err(ConnectionError::InternalGap),
    };

    let window = &selection.slots()[first..=last];
    if window.iter().any(|slot| slot.is_none()) {
        return Err(ConnectionError::InternalGap);
    }

    for pair in window.windows(2) {
        let (Some(current), Some(next)) = (&pair[0], &pair[1]) else {
            continue; // the gap scan above rules this out
        };

        if next.departure <= current.arrival {
            return Err(ConnectionError::OutOfSequence);
        }

        let wait = hours_between(current.arrival, next.departure);
        if wait < MIN_LAYOVER_HOURS {
            return Err(ConnectionError::LayoverTooShort {
                hours: round_hundredths(wait),
            });
        }
        if wait > MAX_LAYOVER_HOURS {
            return Err(ConnectionError::LayoverTooLong {
                hours: wait.floor(),
            });
        }
    }

    Ok(())
}

/// Check whether `candidate` can occupy slot `index` of `selection`.
///
/// The candidate is compared against its nearest chosen neighbors on each
/// side (whatever currently occupies `index` itself is ignored, since the
/// candidate would replace it). Unlike [`validate_connections`] there is no
/// sequence check against neighbors: a candidate departing before the
/// previous arrival simply reports a negative wait as "not enough time".
///
/// An out-of-range `index` is checked against the neighbors that exist.
pub fn check_slot_fit(
    selection: &Selection,
    index: usize,
    candidate: &Offer,
) -> Result<(), SlotFitError> {
    if !candidate.is_chronological() {
        return Err(SlotFitError::NotChronological);
    }

    let previous = (0..index.min(selection.len()))
        .rev()
        .find_map(|i| selection.slot(i));
    let next = (index.saturating_add(1)..selection.len()).find_map(|i| selection.slot(i));

    if let Some(previous) = previous {
        let wait = hours_between(previous.arrival, candidate.departure);
        if wait < MIN_LAYOVER_HOURS {
            return Err(SlotFitError::TooSoonAfterPrevious {
                hours: round_hundredths(wait),
            });
        }
        if wait > MAX_LAYOVER_HOURS {
            return Err(SlotFitError::TooLongAfterPrevious {
                hours: wait.floor(),
            });
        }
    }

    if let Some(next) = next {
        let wait = hours_between(candidate.arrival, next.departure);
        if wait < MIN_LAYOVER_HOURS {
            return Err(SlotFitError::TooSoonBeforeNext {
                hours: round_hundredths(wait),
            });
        }
        if wait > MAX_LAYOVER_HOURS {
            return Err(SlotFitError::TooLongBeforeNext {
                hours: wait.floor(),
            });
        }
    }

    Ok(())
}

fn round_hundredths(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::DateTime;
    use proptest::prelude::*;

    /// Build a complete selection of chained offers. Each spec is
    /// (gap to previous arrival, flight duration), in minutes; the first
    /// gap is ignored.
    fn chained_selection(specs: &[(i64, i64)]) -> (Selection, Vec<i64>) {
        let mut slots = Vec::with_capacity(specs.len());
        let mut gaps = Vec::new();
        let mut cursor = 0i64;

        for (i, (gap, duration)) in specs.iter().enumerate() {
            if i > 0 {
                cursor += gap;
                gaps.push(*gap);
            }
            let departure = DateTime::from_timestamp(cursor * 60, 0).unwrap();
            cursor += duration;
            let arrival = DateTime::from_timestamp(cursor * 60, 0).unwrap();
            slots.push(Some(Offer::new(
                format!("o{i}"),
                "Comet Lines",
                100.0,
                departure,
                arrival,
            )));
        }

        (Selection::from_slots(slots), gaps)
    }

    fn specs_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
        prop::collection::vec((-120i64..4000, 1i64..600), 2..6)
    }

    proptest! {
        #[test]
        fn verdict_matches_pairwise_layover_rule(specs in specs_strategy()) {
            let (selection, gaps) = chained_selection(&specs);

            let valid = validate_connections(&selection, false).is_ok();
            // Valid iff every wait is between 1 and 48 hours inclusive.
            let expected = gaps.iter().all(|gap| (60..=2880).contains(gap));

            prop_assert_eq!(valid, expected);
        }

        #[test]
        fn partial_mode_agrees_on_complete_selections(specs in specs_strategy()) {
            let (selection, _) = chained_selection(&specs);

            prop_assert_eq!(
                validate_connections(&selection, false),
                validate_connections(&selection, true)
            );
        }

        #[test]
        fn fitting_candidate_into_valid_pair_preserves_verdict(
            lead in 60i64..2880,
            trail in 60i64..2880,
            duration in 1i64..600,
        ) {
            // Previous flight 00:00-01:00, candidate after `lead` minutes,
            // next flight `trail` minutes after the candidate arrives.
            let previous = Offer::new(
                "prev",
                "Comet Lines",
                50.0,
                DateTime::from_timestamp(0, 0).unwrap(),
                DateTime::from_timestamp(3600, 0).unwrap(),
            );
            let candidate_departure = 60 + lead;
            let candidate_arrival = candidate_departure + duration;
            let candidate = Offer::new(
                "cand",
                "Comet Lines",
                50.0,
                DateTime::from_timestamp(candidate_departure * 60, 0).unwrap(),
                DateTime::from_timestamp(candidate_arrival * 60, 0).unwrap(),
            );
            let next_departure = candidate_arrival + trail;
            let next = Offer::new(
                "next",
                "Comet Lines",
                50.0,
                DateTime::from_timestamp(next_departure * 60, 0).unwrap(),
                DateTime::from_timestamp((next_departure + 60) * 60, 0).unwrap(),
            );

            let selection = Selection::from_slots(vec![Some(previous.clone()), None, Some(next.clone())]);
            prop_assert!(check_slot_fit(&selection, 1, &candidate).is_ok());

            // Filling the slot must produce a fully valid selection.
            let mut filled = selection.clone();
            filled.set(1, candidate);
            prop_assert!(validate_connections(&filled, false).is_ok());
        }
    }
}
