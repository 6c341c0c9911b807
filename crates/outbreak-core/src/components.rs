//! ECS components for hecs entities.
//!
//! Components are plain data structs with no transition logic.
//! The epidemic state machine lives in the sim crate's systems.

use serde::{Deserialize, Serialize};

use crate::enums::HealthStatus;

/// Stable unique identifier, assigned at spawn, immutable for the run.
/// Ids are dense (0..population_size) in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u32);

/// Physical body of a person.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    /// Fixed positive radius (rendering size; the spawn inset from walls).
    pub radius: f64,
}

/// Epidemic state of a person.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Health {
    pub status: HealthStatus,
    /// Absolute elapsed time at which an Infectious person recovers.
    /// Set on infection, cleared on recovery.
    pub recovery_deadline: Option<f64>,
    /// Transient flag, cleared at the start of every tick. Honored only
    /// under the first-touch-wins exclusion policy.
    pub collided_this_tick: bool,
}
