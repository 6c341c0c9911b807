//! Status aggregation: counts each compartment across the population.
//!
//! Read-only; the engine samples this on the reporter cadence and on demand.

use hecs::World;

use outbreak_core::components::Health;
use outbreak_core::enums::HealthStatus;
use outbreak_core::state::StatusReport;
use outbreak_core::types::SimTime;

/// Count every person's status. The counts always sum to the population
/// size, since each person is in exactly one compartment.
pub fn count(world: &World, time: &SimTime) -> StatusReport {
    let mut report = StatusReport {
        tick: time.tick,
        elapsed: time.elapsed,
        ..Default::default()
    };
    for (_entity, health) in world.query::<&Health>().iter() {
        match health.status {
            HealthStatus::Susceptible => report.susceptible += 1,
            HealthStatus::Infectious => report.infectious += 1,
            HealthStatus::Recovered => report.recovered += 1,
            HealthStatus::Vaccinated => report.vaccinated += 1,
        }
    }
    report
}
