//! Group-mixing contagion strategy.
//!
//! The alternate propagation model: instead of proximity collisions, the
//! population is shuffled into fixed-size cells each round. In any cell
//! with at least one infectious member, every infectious member recovers
//! immediately and every susceptible member becomes infectious. Leftover
//! entities that do not fill a cell sit the round out.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use outbreak_core::components::{Health, PersonId};
use outbreak_core::enums::HealthStatus;
use outbreak_core::events::HealthEvent;
use outbreak_core::types::SimTime;

use crate::systems::contagion;

/// Run one mixing round.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    cell_size: usize,
    time: SimTime,
    recovery_duration: f64,
    events: &mut Vec<HealthEvent>,
) {
    // Shuffle from a sorted base so the partition depends only on the seed.
    let mut members: Vec<(PersonId, Entity)> = world
        .query::<&PersonId>()
        .iter()
        .map(|(entity, id)| (*id, entity))
        .collect();
    members.sort_by_key(|(id, _)| *id);
    members.shuffle(rng);

    for cell in members.chunks_exact(cell_size) {
        let any_infectious = cell.iter().any(|&(_, entity)| {
            world
                .get::<&Health>(entity)
                .map(|h| h.status == HealthStatus::Infectious)
                .unwrap_or(false)
        });
        if !any_infectious {
            continue;
        }

        for &(id, entity) in cell {
            if let Ok(mut health) = world.get::<&mut Health>(entity) {
                match health.status {
                    HealthStatus::Infectious => {
                        health.status = HealthStatus::Recovered;
                        health.recovery_deadline = None;
                        events.push(HealthEvent::Recovered {
                            id: id.0,
                            tick: time.tick,
                        });
                    }
                    HealthStatus::Susceptible => {
                        if contagion::infect(&mut health, time.elapsed, recovery_duration) {
                            events.push(HealthEvent::Infected {
                                id: id.0,
                                tick: time.tick,
                            });
                        }
                    }
                    HealthStatus::Recovered | HealthStatus::Vaccinated => {}
                }
            }
        }
    }
}
