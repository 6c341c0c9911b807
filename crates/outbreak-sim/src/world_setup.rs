//! Population spawn factories.
//!
//! Persons spawn at random positions inset from the walls by the body
//! radius, with per-axis velocity components rolled from the active speed
//! profile's choice set. All persons carry the same component bundle, so
//! query iteration order equals spawn order (ascending id).

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use outbreak_core::components::{Body, Health, PersonId};
use outbreak_core::enums::SpeedProfile;
use outbreak_core::types::{Position, Velocity};

use crate::engine::SimConfig;

/// Spawn the whole population and return the id -> entity index.
pub fn spawn_population(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
) -> HashMap<u32, Entity> {
    let mut index = HashMap::with_capacity(config.population_size);
    for id in 0..config.population_size as u32 {
        let entity = spawn_person(world, rng, config, id);
        index.insert(id, entity);
    }
    index
}

/// Spawn a single susceptible person.
fn spawn_person(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig, id: u32) -> Entity {
    let r = config.body_radius;
    let position = Position::new(
        rng.gen_range(r..=config.arena_width - r),
        rng.gen_range(r..=config.arena_height - r),
    );
    let velocity = roll_velocity(rng, config.speed_profile);

    world.spawn((
        PersonId(id),
        position,
        velocity,
        Body { radius: r },
        Health::default(),
    ))
}

/// Roll a velocity with each axis drawn from the profile's choice set.
pub fn roll_velocity(rng: &mut ChaCha8Rng, profile: SpeedProfile) -> Velocity {
    let choices = profile.component_choices();
    Velocity::new(
        choices[rng.gen_range(0..choices.len())],
        choices[rng.gen_range(0..choices.len())],
    )
}

/// Re-roll every person's velocity from the given profile's choice set.
/// This is the lockdown action: `Slow` damps the whole population's mixing.
pub fn reroll_velocities(world: &mut World, rng: &mut ChaCha8Rng, profile: SpeedProfile) {
    for (_entity, velocity) in world.query_mut::<&mut Velocity>() {
        *velocity = roll_velocity(rng, profile);
    }
}
