//! Error taxonomy for the simulation engine.
//!
//! Malformed input is rejected before any state mutation. Illegal
//! transitions (e.g. vaccinating an infectious person) are silent no-ops,
//! not errors, so repeated calls stay idempotent.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Rejected at construction: non-positive population, radius, arena
    /// dimensions, contact radius, recovery duration, or fixed step.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Seeding or vaccination referenced an id not present in the population.
    #[error("unknown person id {id}")]
    UnknownPerson { id: u32 },
}
