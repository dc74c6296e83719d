//! Budget limits for itinerary search.

use std::time::{Duration, Instant};

/// Resource limits for one search invocation.
///
/// Enumeration and combination search both terminate on their own for sane
/// catalogues (the hop bound keeps paths short); these limits cut off
/// degenerate inputs such as a single hub with thousands of offers per leg.
/// When a limit is hit the search reports whatever it found so far together
/// with a truncation flag.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum number of candidate offers examined per combination search.
    pub max_steps: u64,

    /// Maximum number of distinct paths the enumerator will collect.
    pub max_paths: usize,

    /// Optional wall-clock budget for the whole search (milliseconds).
    pub time_budget_ms: Option<u64>,
}

impl SearchLimits {
    /// Create limits with the given parameters.
    pub fn new(max_steps: u64, max_paths: usize, time_budget_ms: Option<u64>) -> Self {
        Self {
            max_steps,
            max_paths,
            time_budget_ms,
        }
    }

    /// Returns the time budget as a Duration.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Deadline for a search starting now, if a time budget is set.
    pub fn deadline(&self) -> Option<Instant> {
        self.time_budget().map(|budget| Instant::now() + budget)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_steps: 1_000_000,
            max_paths: 10_000,
            time_budget_ms: None,
        }
    }
}
