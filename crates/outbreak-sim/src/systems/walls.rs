//! Wall reflection system.
//!
//! After integration, every entity is clamped back inside the arena and the
//! offending velocity component is negated. The axis checks are independent
//! (a corner overshoot reflects on both axes in the same tick) and run in a
//! fixed order — x before y, low bound before high — for deterministic
//! replay. An entity sitting exactly on a bound with outward velocity is
//! reflected on the tick it would exceed the bound, not pre-emptively.

use hecs::World;

use outbreak_core::types::{Position, Velocity};

/// Reflect every out-of-bounds entity back into `[0, width] x [0, height]`.
pub fn run(world: &mut World, width: f64, height: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &mut Velocity)>() {
        if pos.x < 0.0 {
            pos.x = 0.0;
            vel.dx = -vel.dx;
        }
        if pos.x > width {
            pos.x = width;
            vel.dx = -vel.dx;
        }
        if pos.y < 0.0 {
            pos.y = 0.0;
            vel.dy = -vel.dy;
        }
        if pos.y > height {
            pos.y = height;
            vel.dy = -vel.dy;
        }
    }
}
