//! Instant parsing and duration arithmetic.
//!
//! The catalogue provides offer start/end times as ISO-8601 strings. This
//! module parses them into UTC instants and provides the fractional-hour
//! arithmetic the rest of the engine works in.

use chrono::{DateTime, Utc};

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

const MILLIS_PER_HOUR: f64 = (1000 * 60 * 60) as f64;

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Accepts an optional fractional-second part of any precision and any
/// UTC offset; the result is normalized to UTC.
///
/// # Examples
///
/// ```
/// use odyssey_server::domain::parse_instant;
///
/// assert!(parse_instant("2019-09-03T15:31:34.2343434Z").is_ok());
/// assert!(parse_instant("2024-03-15T08:00:00+02:00").is_ok());
///
/// assert!(parse_instant("2024-03-15").is_err());
/// assert!(parse_instant("not a time").is_err());
/// ```
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, TimeError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimeError {
            reason: "expected an ISO-8601 instant",
        })
}

/// Elapsed time from `start` to `end` in fractional hours.
///
/// Negative when `end` precedes `start`; callers that care about sign
/// (offer validity, layover checks) test it explicitly rather than
/// relying on this function to reject reversed inputs.
///
/// # Examples
///
/// ```
/// use odyssey_server::domain::{hours_between, parse_instant};
///
/// let start = parse_instant("2024-03-15T08:00:00Z").unwrap();
/// let end = parse_instant("2024-03-15T12:30:00Z").unwrap();
///
/// assert_eq!(hours_between(start, end), 4.5);
/// assert_eq!(hours_between(end, start), -4.5);
/// ```
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_instant()(secs in 0i64..4_000_000_000) -> DateTime<Utc> {
            Utc.timestamp_opt(secs, 0).unwrap()
        }
    }

    proptest! {
        /// hours_between is antisymmetric
        #[test]
        fn antisymmetric(a in valid_instant(), b in valid_instant()) {
            prop_assert_eq!(hours_between(a, b), -hours_between(b, a));
        }

        /// Sign of hours_between agrees with instant ordering
        #[test]
        fn sign_matches_ordering(a in valid_instant(), b in valid_instant()) {
            let h = hours_between(a, b);
            if a < b {
                prop_assert!(h > 0.0);
            } else if a > b {
                prop_assert!(h < 0.0);
            } else {
                prop_assert_eq!(h, 0.0);
            }
        }

        /// RFC 3339 text for any generated instant parses back to it
        #[test]
        fn rfc3339_roundtrip(t in valid_instant()) {
            let parsed = parse_instant(&t.to_rfc3339()).unwrap();
            prop_assert_eq!(parsed, t);
        }
    }
}
