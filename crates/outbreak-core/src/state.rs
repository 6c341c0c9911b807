//! Simulation snapshot — the complete visible state returned to the caller
//! each tick. Snapshots are owned data and never alias engine internals.

use serde::{Deserialize, Serialize};

use crate::enums::{HealthStatus, RunPhase};
use crate::events::HealthEvent;
use crate::types::SimTime;

/// Complete simulation state handed back after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: RunPhase,
    /// All persons, sorted by id ascending.
    pub people: Vec<PersonView>,
    /// Status counts at this tick.
    pub report: StatusReport,
    /// Transitions that occurred since the previous snapshot.
    pub events: Vec<HealthEvent>,
}

/// Read-only view of one person, enough to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub status: HealthStatus,
}

/// Aggregate status counts across the population.
/// The four counts always sum to the population size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub susceptible: usize,
    pub infectious: usize,
    pub recovered: usize,
    pub vaccinated: usize,
    /// Tick at which the sample was taken.
    pub tick: u64,
    /// Elapsed time at which the sample was taken.
    pub elapsed: f64,
}

impl StatusReport {
    /// Total population accounted for.
    pub fn total(&self) -> usize {
        self.susceptible + self.infectious + self.recovered + self.vaccinated
    }
}
