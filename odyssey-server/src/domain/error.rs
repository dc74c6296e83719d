//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from API/IO errors.

use super::Planet;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., non-finite distance)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Path has no legs
    #[error("path must contain at least one leg")]
    EmptyPath,

    /// Consecutive legs in a path don't share a planet
    #[error("legs do not connect: previous leg ends at {0}, next starts at {1}")]
    LegsNotConnected(Planet, Planet),
}
