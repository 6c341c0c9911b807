//! The epidemic state machine.
//!
//! Susceptible -> Infectious -> Recovered, linear, no re-infection.
//! Vaccinated is reachable from Susceptible or Recovered via an explicit
//! action outside the collision path, and is terminal.
//!
//! Recovery is not a timer callback: infection stamps an absolute deadline
//! and a per-tick sweep over infectious entities fires the transition once
//! `elapsed >= deadline`. That keeps the engine single-threaded,
//! deterministic, and unit-testable without a clock.

use hecs::{Entity, World};

use outbreak_core::components::{Health, PersonId};
use outbreak_core::enums::HealthStatus;
use outbreak_core::events::HealthEvent;
use outbreak_core::types::SimTime;

/// Infect a person. No-op unless Susceptible; on success schedules the
/// recovery deadline. Returns whether the transition happened.
pub fn infect(health: &mut Health, now: f64, recovery_duration: f64) -> bool {
    if health.status != HealthStatus::Susceptible {
        return false;
    }
    health.status = HealthStatus::Infectious;
    health.recovery_deadline = Some(now + recovery_duration);
    true
}

/// Vaccinate a person. Legal from Susceptible or Recovered; a silent no-op
/// otherwise. Returns whether the transition happened.
pub fn vaccinate(health: &mut Health) -> bool {
    match health.status {
        HealthStatus::Susceptible | HealthStatus::Recovered => {
            health.status = HealthStatus::Vaccinated;
            true
        }
        HealthStatus::Infectious | HealthStatus::Vaccinated => false,
    }
}

/// Transmission rule on a resolved collision: each infectious side infects
/// the other. Both directions are checked against the pre-collision
/// statuses, so Infectious x Infectious and Infectious x terminal pairs are
/// no-ops.
pub fn transmit(
    world: &mut World,
    a: Entity,
    b: Entity,
    time: SimTime,
    recovery_duration: f64,
    events: &mut Vec<HealthEvent>,
) {
    let status_a = status_of(world, a);
    let status_b = status_of(world, b);
    if status_a == Some(HealthStatus::Infectious) {
        try_infect(world, b, time, recovery_duration, events);
    }
    if status_b == Some(HealthStatus::Infectious) {
        try_infect(world, a, time, recovery_duration, events);
    }
}

/// Recovery sweep: transition every infectious person whose deadline has
/// elapsed. The status change removes it from later sweeps, so the
/// transition fires exactly once.
pub fn run_recovery(world: &mut World, time: SimTime, events: &mut Vec<HealthEvent>) {
    for (_entity, (id, health)) in world.query_mut::<(&PersonId, &mut Health)>() {
        if health.status != HealthStatus::Infectious {
            continue;
        }
        let due = health
            .recovery_deadline
            .is_some_and(|deadline| time.elapsed >= deadline);
        if due {
            health.status = HealthStatus::Recovered;
            health.recovery_deadline = None;
            events.push(HealthEvent::Recovered {
                id: id.0,
                tick: time.tick,
            });
        }
    }
}

fn try_infect(
    world: &mut World,
    entity: Entity,
    time: SimTime,
    recovery_duration: f64,
    events: &mut Vec<HealthEvent>,
) {
    let id = match world.get::<&PersonId>(entity) {
        Ok(id) => id.0,
        Err(_) => return,
    };
    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        if infect(&mut health, time.elapsed, recovery_duration) {
            events.push(HealthEvent::Infected {
                id,
                tick: time.tick,
            });
        }
    }
}

fn status_of(world: &World, entity: Entity) -> Option<HealthStatus> {
    world.get::<&Health>(entity).map(|h| h.status).ok()
}
