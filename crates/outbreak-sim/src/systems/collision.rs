//! Collision detection and resolution.
//!
//! Brute-force all-pairs: the C(n,2) pair universe is enumerated once (the
//! population never changes mid-run) and only the distance test is
//! re-evaluated each tick. Pairs are processed in ascending (first id,
//! second id) order so a run replays identically.
//!
//! Resolution is a plain velocity-vector swap — not mass- or
//! angle-dependent. The goal is mixing trajectories, not physics.

use hecs::{Entity, World};

use outbreak_core::components::{Health, PersonId};
use outbreak_core::enums::CollisionExclusion;
use outbreak_core::events::HealthEvent;
use outbreak_core::types::{Position, SimTime, Velocity};

use crate::systems::contagion;

/// Clear every entity's transient collision flag. Runs first each tick.
pub fn clear_flags(world: &mut World) {
    for (_entity, health) in world.query_mut::<&mut Health>() {
        health.collided_this_tick = false;
    }
}

/// Enumerate all unordered entity pairs, ordered ascending by
/// (first id, second id). Called once per run, on the first detection pass.
pub fn enumerate_pairs(world: &World) -> Vec<(Entity, Entity)> {
    let mut members: Vec<(PersonId, Entity)> = world
        .query::<&PersonId>()
        .iter()
        .map(|(entity, id)| (*id, entity))
        .collect();
    members.sort_by_key(|(id, _)| *id);

    let n = members.len();
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((members[i].1, members[j].1));
        }
    }
    pairs
}

/// Test every cached pair against the contact threshold and resolve the
/// qualifying ones: swap velocities, then (when `transmit` is set) apply
/// the transmission rule in both directions.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    pairs: &[(Entity, Entity)],
    contact_radius: f64,
    exclusion: CollisionExclusion,
    transmit: bool,
    time: SimTime,
    recovery_duration: f64,
    events: &mut Vec<HealthEvent>,
) {
    for &(a, b) in pairs {
        if exclusion == CollisionExclusion::FirstTouchWins
            && (collided_this_tick(world, a) || collided_this_tick(world, b))
        {
            continue;
        }

        let pos_a = match world.get::<&Position>(a) {
            Ok(p) => *p,
            Err(_) => continue,
        };
        let pos_b = match world.get::<&Position>(b) {
            Ok(p) => *p,
            Err(_) => continue,
        };
        if pos_a.distance_to(&pos_b) > contact_radius {
            continue;
        }

        resolve(world, a, b);
        if transmit {
            contagion::transmit(world, a, b, time, recovery_duration, events);
        }
    }
}

/// Swap the pair's velocity vectors and mark both as collided this tick.
fn resolve(world: &mut World, a: Entity, b: Entity) {
    let vel_a = match world.get::<&Velocity>(a) {
        Ok(v) => *v,
        Err(_) => return,
    };
    let vel_b = match world.get::<&Velocity>(b) {
        Ok(v) => *v,
        Err(_) => return,
    };
    if let Ok(mut v) = world.get::<&mut Velocity>(a) {
        *v = vel_b;
    }
    if let Ok(mut v) = world.get::<&mut Velocity>(b) {
        *v = vel_a;
    }
    for entity in [a, b] {
        if let Ok(mut health) = world.get::<&mut Health>(entity) {
            health.collided_this_tick = true;
        }
    }
}

fn collided_this_tick(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|h| h.collided_this_tick)
        .unwrap_or(false)
}
