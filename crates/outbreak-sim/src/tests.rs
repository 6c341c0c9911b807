//! Tests for the simulation engine: physics, contagion, reporting, and the
//! run lifecycle.

use std::collections::HashSet;

use outbreak_core::commands::EngineCommand;
use outbreak_core::components::{Health, PersonId};
use outbreak_core::enums::*;
use outbreak_core::error::SimError;
use outbreak_core::events::HealthEvent;
use outbreak_core::types::Velocity;

use crate::engine::{SimConfig, Simulation};
use crate::systems::contagion;

fn velocity_of(sim: &Simulation, id: u32) -> Velocity {
    let mut query = sim.world().query::<(&PersonId, &Velocity)>();
    query
        .iter()
        .find(|(_, (pid, _))| pid.0 == id)
        .map(|(_, (_, vel))| *vel)
        .unwrap()
}

fn status_of(sim: &Simulation, id: u32) -> HealthStatus {
    let mut query = sim.world().query::<(&PersonId, &Health)>();
    query
        .iter()
        .find(|(_, (pid, _))| pid.0 == id)
        .map(|(_, (_, health))| health.status)
        .unwrap()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut sim_a = Simulation::new(config).unwrap();
    let mut sim_b = Simulation::new(config).unwrap();
    sim_a.seed_infection(&[0]).unwrap();
    sim_b.seed_infection(&[0]).unwrap();

    for _ in 0..300 {
        let snap_a = sim_a.tick();
        let snap_b = sim_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut sim_a = Simulation::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut sim_b = Simulation::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    // Placement is already seed-dependent, so the first tick diverges.
    let json_a = serde_json::to_string(&sim_a.tick()).unwrap();
    let json_b = serde_json::to_string(&sim_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should diverge");
}

// ---- Physics ----

#[test]
fn test_boundary_containment() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.seed_infection(&[0]).unwrap();

    for _ in 0..500 {
        let snap = sim.tick();
        for person in &snap.people {
            assert!(
                person.x >= 0.0 && person.x <= 600.0,
                "person {} escaped on x: {}",
                person.id,
                person.x
            );
            assert!(
                person.y >= 0.0 && person.y <= 600.0,
                "person {} escaped on y: {}",
                person.id,
                person.y
            );
        }
    }
}

#[test]
fn test_wall_reflection_single_tick() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 1,
        ..Default::default()
    })
    .unwrap();
    // Integrates to x = -1, which must clamp to 0 and negate dx this tick.
    sim.place(0, 0.5, 100.0, -1.5, 0.0);

    let snap = sim.tick();
    assert_eq!(snap.people[0].x, 0.0);
    assert_eq!(snap.people[0].y, 100.0);
    let vel = velocity_of(&sim, 0);
    assert_eq!(vel.dx, 1.5);
    assert_eq!(vel.dy, 0.0);
}

#[test]
fn test_corner_reflection_both_axes() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 1,
        ..Default::default()
    })
    .unwrap();
    sim.place(0, 0.5, 0.5, -1.0, -1.0);

    let snap = sim.tick();
    // Axis checks are independent: a corner overshoot reflects on both.
    assert_eq!(snap.people[0].x, 0.0);
    assert_eq!(snap.people[0].y, 0.0);
    let vel = velocity_of(&sim, 0);
    assert_eq!(vel.dx, 1.0);
    assert_eq!(vel.dy, 1.0);
}

#[test]
fn test_high_bound_reflection() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 1,
        ..Default::default()
    })
    .unwrap();
    sim.place(0, 599.5, 100.0, 2.0, 0.0);

    let snap = sim.tick();
    assert_eq!(snap.people[0].x, 600.0);
    assert_eq!(velocity_of(&sim, 0).dx, -2.0);
}

// ---- Collision resolution ----

#[test]
fn test_coincident_pair_swaps_and_infects() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 2,
        ..Default::default()
    })
    .unwrap();
    sim.seed_infection(&[0]).unwrap();
    // Coincident, moving apart: after integration they sit 2 units apart,
    // inside the 5-unit contact radius.
    sim.place(0, 100.0, 100.0, 1.0, 0.0);
    sim.place(1, 100.0, 100.0, -1.0, 0.0);

    let snap = sim.tick();
    assert_eq!(velocity_of(&sim, 0), Velocity::new(-1.0, 0.0));
    assert_eq!(velocity_of(&sim, 1), Velocity::new(1.0, 0.0));
    assert_eq!(status_of(&sim, 0), HealthStatus::Infectious);
    assert_eq!(status_of(&sim, 1), HealthStatus::Infectious);
    assert!(snap
        .events
        .contains(&HealthEvent::Infected { id: 1, tick: 0 }));
}

#[test]
fn test_first_touch_wins_exclusion() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 3,
        exclusion: CollisionExclusion::FirstTouchWins,
        ..Default::default()
    })
    .unwrap();
    // All three end the integration within contact range of each other.
    sim.place(0, 100.0, 100.0, 1.0, 0.0);
    sim.place(1, 101.0, 100.0, 2.0, 0.0);
    sim.place(2, 102.0, 100.0, 3.0, 0.0);

    sim.tick();
    // Pair (0,1) resolves first and marks both; (0,2) and (1,2) are skipped,
    // so person 2 keeps its velocity.
    assert_eq!(velocity_of(&sim, 0).dx, 2.0);
    assert_eq!(velocity_of(&sim, 1).dx, 1.0);
    assert_eq!(velocity_of(&sim, 2).dx, 3.0);
}

#[test]
fn test_no_exclusion_resolves_every_pair() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 3,
        exclusion: CollisionExclusion::None,
        ..Default::default()
    })
    .unwrap();
    sim.place(0, 100.0, 100.0, 1.0, 0.0);
    sim.place(1, 101.0, 100.0, 2.0, 0.0);
    sim.place(2, 102.0, 100.0, 3.0, 0.0);

    sim.tick();
    // (0,1): 2,1,3 -> (0,2): 3,1,2 -> (1,2): 3,2,1.
    assert_eq!(velocity_of(&sim, 0).dx, 3.0);
    assert_eq!(velocity_of(&sim, 1).dx, 2.0);
    assert_eq!(velocity_of(&sim, 2).dx, 1.0);
}

// ---- Epidemic state machine ----

#[test]
fn test_infect_only_from_susceptible() {
    let mut health = Health::default();
    assert!(contagion::infect(&mut health, 10.0, 4.0));
    assert_eq!(health.status, HealthStatus::Infectious);
    assert_eq!(health.recovery_deadline, Some(14.0));

    // Repeat infection must not reschedule the deadline.
    assert!(!contagion::infect(&mut health, 12.0, 4.0));
    assert_eq!(health.recovery_deadline, Some(14.0));

    health.status = HealthStatus::Recovered;
    assert!(!contagion::infect(&mut health, 12.0, 4.0));
    health.status = HealthStatus::Vaccinated;
    assert!(!contagion::infect(&mut health, 12.0, 4.0));
}

#[test]
fn test_vaccinate_transitions() {
    let mut health = Health::default();
    assert!(contagion::vaccinate(&mut health));
    assert_eq!(health.status, HealthStatus::Vaccinated);
    assert!(!contagion::vaccinate(&mut health));

    let mut infectious = Health {
        status: HealthStatus::Infectious,
        ..Default::default()
    };
    assert!(!contagion::vaccinate(&mut infectious));
    assert_eq!(infectious.status, HealthStatus::Infectious);

    let mut recovered = Health {
        status: HealthStatus::Recovered,
        ..Default::default()
    };
    assert!(contagion::vaccinate(&mut recovered));
    assert_eq!(recovered.status, HealthStatus::Vaccinated);
}

#[test]
fn test_recovery_fires_exactly_once() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 1,
        recovery_duration: 4.0,
        ..Default::default()
    })
    .unwrap();
    sim.place(0, 300.0, 300.0, 0.0, 0.0);
    sim.seed_infection(&[0]).unwrap();

    let mut recoveries = 0;
    for _ in 0..10 {
        let snap = sim.tick();
        recoveries += snap
            .events
            .iter()
            .filter(|e| matches!(e, HealthEvent::Recovered { .. }))
            .count();
    }
    assert_eq!(recoveries, 1, "recover must fire exactly once");
    assert_eq!(status_of(&sim, 0), HealthStatus::Recovered);
}

#[test]
fn test_no_reinfection_after_recovery() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 2,
        ..Default::default()
    })
    .unwrap();
    // Stationary and coincident: they collide every tick.
    sim.place(0, 300.0, 300.0, 0.0, 0.0);
    sim.place(1, 300.0, 300.0, 0.0, 0.0);
    sim.seed_infection(&[0]).unwrap();

    for _ in 0..6 {
        sim.tick();
    }
    assert_eq!(sim.report().recovered, 2);

    // Still colliding every tick, yet nobody leaves Recovered.
    for _ in 0..10 {
        let snap = sim.tick();
        assert_eq!(snap.report.recovered, 2);
        assert!(!snap
            .events
            .iter()
            .any(|e| matches!(e, HealthEvent::Infected { .. })));
    }
}

#[test]
fn test_vaccinated_never_infected() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 2,
        ..Default::default()
    })
    .unwrap();
    sim.place(0, 300.0, 300.0, 0.0, 0.0);
    sim.place(1, 300.0, 300.0, 0.0, 0.0);
    sim.vaccinate(1).unwrap();
    sim.seed_infection(&[0]).unwrap();

    for _ in 0..10 {
        sim.tick();
    }
    assert_eq!(status_of(&sim, 1), HealthStatus::Vaccinated);
    assert_eq!(status_of(&sim, 0), HealthStatus::Recovered);
}

#[test]
fn test_vaccinate_infectious_is_silent_noop() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 2,
        ..Default::default()
    })
    .unwrap();
    sim.seed_infection(&[0]).unwrap();

    assert_eq!(sim.vaccinate(0), Ok(()));
    assert_eq!(status_of(&sim, 0), HealthStatus::Infectious);

    let snap = sim.tick();
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, HealthEvent::Vaccinated { .. })));
}

// ---- Input validation ----

#[test]
fn test_seed_unknown_id_rejected_atomically() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 10,
        ..Default::default()
    })
    .unwrap();

    let result = sim.seed_infection(&[0, 999]);
    assert_eq!(result, Err(SimError::UnknownPerson { id: 999 }));
    // Validation precedes mutation: id 0 must not have been infected.
    assert_eq!(sim.report().infectious, 0);
}

#[test]
fn test_vaccinate_unknown_id() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    assert_eq!(sim.vaccinate(100), Err(SimError::UnknownPerson { id: 100 }));
}

#[test]
fn test_invalid_configs_rejected() {
    let invalid = [
        SimConfig {
            population_size: 0,
            ..Default::default()
        },
        SimConfig {
            contact_radius: -1.0,
            ..Default::default()
        },
        SimConfig {
            recovery_duration: 0.0,
            ..Default::default()
        },
        SimConfig {
            arena_width: 15.0, // not wider than twice the 10.0 body radius
            ..Default::default()
        },
        SimConfig {
            fixed_step: 0.0,
            ..Default::default()
        },
        SimConfig {
            spread: SpreadModel::GroupMixing {
                cell_size: 1,
                interval_ticks: 1,
            },
            ..Default::default()
        },
    ];
    for config in invalid {
        assert!(
            matches!(Simulation::new(config), Err(SimError::InvalidConfig { .. })),
            "config should have been rejected: {config:?}"
        );
    }
}

// ---- Conservation & full run ----

#[test]
fn test_conservation_every_tick() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.seed_infection(&[0, 2]).unwrap();

    for _ in 0..300 {
        let snap = sim.tick();
        assert_eq!(snap.report.total(), 100);
    }
    for sample in sim.report_history() {
        assert_eq!(sample.total(), 100);
    }
}

#[test]
fn test_full_run_to_completion() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.seed_infection(&[0]).unwrap();

    let mut ever_infected: HashSet<u32> = HashSet::new();
    let mut ticks = 0u64;
    while !sim.is_complete() {
        let snap = sim.tick();
        for event in &snap.events {
            if let HealthEvent::Infected { id, .. } = event {
                ever_infected.insert(*id);
            }
        }
        ticks += 1;
        assert!(ticks < 100_000, "run did not complete");
    }

    let report = sim.report();
    assert_eq!(report.infectious, 0);
    assert_eq!(report.recovered, ever_infected.len());
    assert_eq!(report.total(), 100);

    // Completed runs are inert: further ticks do not advance time.
    let tick_before = sim.time().tick;
    let snap = sim.tick();
    assert_eq!(snap.time.tick, tick_before);
    assert_eq!(snap.phase, RunPhase::Complete);
}

#[test]
fn test_completion_requires_prior_infection() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    for _ in 0..50 {
        sim.tick();
    }
    // Zero infectious from the start is not completion.
    assert!(!sim.is_complete());
}

// ---- Reporter ----

#[test]
fn test_report_cadence() {
    let mut sim = Simulation::new(SimConfig {
        report_interval: 2.0,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(sim.report_history().len(), 1, "baseline sample at t = 0");

    for _ in 0..10 {
        sim.tick();
    }
    // Samples at elapsed 2, 4, 6, 8, 10 on top of the baseline.
    assert_eq!(sim.report_history().len(), 6);
    assert_eq!(sim.report_history()[1].tick, 2);
}

// ---- Commands ----

#[test]
fn test_pause_and_resume() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.tick();
    assert_eq!(sim.time().tick, 1);

    sim.queue_command(EngineCommand::Pause);
    let snap = sim.tick();
    assert_eq!(snap.phase, RunPhase::Paused);
    assert_eq!(snap.time.tick, 1, "paused ticks must not advance the clock");

    sim.queue_command(EngineCommand::Resume);
    let snap = sim.tick();
    assert_eq!(snap.phase, RunPhase::Running);
    assert_eq!(snap.time.tick, 2);
}

#[test]
fn test_halt_stops_run() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.queue_command(EngineCommand::Halt);
    let snap = sim.tick();
    assert_eq!(snap.phase, RunPhase::Complete);
    assert!(sim.is_complete());
}

#[test]
fn test_lockdown_rerolls_velocities() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.queue_command(EngineCommand::SetSpeedProfile {
        profile: SpeedProfile::Slow,
    });
    let snap = sim.tick();

    assert!(snap.events.iter().any(|e| matches!(
        e,
        HealthEvent::SpeedProfileChanged {
            profile: SpeedProfile::Slow,
            ..
        }
    )));
    // The choice set is direction-symmetric, so wall reflection during the
    // same tick cannot move a component out of it.
    let choices = SpeedProfile::Slow.component_choices();
    for (_, vel) in sim.world().query::<&Velocity>().iter() {
        assert!(choices.contains(&vel.dx));
        assert!(choices.contains(&vel.dy));
    }
}

// ---- Group mixing ----

#[test]
fn test_group_mixing_single_cell() {
    let mut sim = Simulation::new(SimConfig {
        spread: SpreadModel::GroupMixing {
            cell_size: 100,
            interval_ticks: 1,
        },
        recovery_duration: 1000.0, // keep deadline recovery out of the way
        ..Default::default()
    })
    .unwrap();
    sim.seed_infection(&[0]).unwrap();

    // One cell holds everyone: the seed recovers, the other 99 catch it.
    sim.tick();
    let report = sim.report();
    assert_eq!(report.infectious, 99);
    assert_eq!(report.recovered, 1);

    // Next round recovers the lot; nobody is left to infect.
    sim.tick();
    let report = sim.report();
    assert_eq!(report.infectious, 0);
    assert_eq!(report.recovered, 100);
}

#[test]
fn test_group_mixing_remainder_sits_out() {
    let mut sim = Simulation::new(SimConfig {
        population_size: 3,
        spread: SpreadModel::GroupMixing {
            cell_size: 2,
            interval_ticks: 1,
        },
        recovery_duration: 1000.0,
        ..Default::default()
    })
    .unwrap();
    sim.seed_infection(&[0, 1, 2]).unwrap();

    sim.tick();
    // One cell of two recovers; the leftover member skips the round.
    let report = sim.report();
    assert_eq!(report.recovered, 2);
    assert_eq!(report.infectious, 1);
}

#[test]
fn test_group_mixing_interval() {
    let mut sim = Simulation::new(SimConfig {
        spread: SpreadModel::GroupMixing {
            cell_size: 100,
            interval_ticks: 5,
        },
        recovery_duration: 1000.0,
        ..Default::default()
    })
    .unwrap();
    sim.seed_infection(&[0]).unwrap();

    for _ in 0..4 {
        sim.tick();
        assert_eq!(sim.report().infectious, 1, "no mixing before the interval");
    }
    sim.tick();
    assert_eq!(sim.report().infectious, 99);
}

// ---- Snapshots ----

#[test]
fn test_snapshot_sorted_by_id() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    let snap = sim.tick();

    assert_eq!(snap.people.len(), 100);
    for (expected, person) in snap.people.iter().enumerate() {
        assert_eq!(person.id, expected as u32);
        assert_eq!(person.radius, 10.0);
    }
}

#[test]
fn test_snapshot_is_readonly() {
    let sim = Simulation::new(SimConfig::default()).unwrap();
    let a = serde_json::to_string(&sim.snapshot()).unwrap();
    let b = serde_json::to_string(&sim.snapshot()).unwrap();
    assert_eq!(a, b);
    assert_eq!(sim.time().tick, 0);
}
