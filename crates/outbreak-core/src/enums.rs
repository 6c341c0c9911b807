//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{FAST_COMPONENTS, NORMAL_COMPONENTS, SLOW_COMPONENTS};

/// Epidemic compartment of a person. Exactly one holds at any time.
///
/// Infectious is reachable only from Susceptible. Recovered and Vaccinated
/// are terminal with respect to infection: no collision sequence can make
/// them Infectious again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Can be infected. Can be vaccinated.
    #[default]
    Susceptible,
    /// Can infect others. Cannot be infected or vaccinated. Recovers once
    /// its scheduled deadline elapses.
    Infectious,
    /// Cannot be infected. Can be vaccinated.
    Recovered,
    /// Cannot be infected.
    Vaccinated,
}

/// Run lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Ticks advance the simulation.
    #[default]
    Running,
    /// Ticks are no-ops until resumed.
    Paused,
    /// No infectious entities remain (or the run was halted); ticks are no-ops.
    Complete,
}

/// Movement speed profile: the set of velocity components rolled at spawn
/// (and re-rolled by a lockdown/speed command).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedProfile {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedProfile {
    /// The per-axis component choice set for this profile.
    pub fn component_choices(&self) -> &'static [f64] {
        match self {
            SpeedProfile::Slow => SLOW_COMPONENTS,
            SpeedProfile::Normal => NORMAL_COMPONENTS,
            SpeedProfile::Fast => FAST_COMPONENTS,
        }
    }
}

/// Per-tick collision exclusion policy.
///
/// The source demos disagree on whether an entity may resolve more than one
/// collision per tick, so both behaviors are representable. The default is
/// no exclusion: every qualifying pair resolves independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionExclusion {
    /// Every qualifying pair resolves, in ascending (first id, second id) order.
    #[default]
    None,
    /// Once an entity has resolved a collision this tick, any later-checked
    /// pair containing it is skipped.
    FirstTouchWins,
}

/// Contagion propagation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpreadModel {
    /// Transmission happens on resolved proximity collisions.
    #[default]
    Proximity,
    /// Cellular group mixing: every `interval_ticks`, the population is
    /// shuffled into cells of `cell_size`; in any cell with an infectious
    /// member, every infectious member recovers and every susceptible
    /// member becomes infectious. Collisions still swap velocities but do
    /// not transmit.
    GroupMixing { cell_size: usize, interval_ticks: u64 },
}
