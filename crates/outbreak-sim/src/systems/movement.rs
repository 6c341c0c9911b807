//! Motion integration system.
//!
//! Updates Position from Velocity each tick: `position += velocity * step`.
//! No clamping here; keeping entities inside the arena is the wall system's
//! job.

use hecs::World;

use outbreak_core::types::{Position, Velocity};

/// Integrate every entity's position by one fixed step.
pub fn run(world: &mut World, step: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.dx * step;
        pos.y += vel.dy * step;
    }
}
