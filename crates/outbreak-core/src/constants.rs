//! Simulation defaults and tuning parameters.

/// Default population size.
pub const DEFAULT_POPULATION: usize = 100;

/// Default arena width (abstract units).
pub const DEFAULT_ARENA_WIDTH: f64 = 600.0;

/// Default arena height (abstract units).
pub const DEFAULT_ARENA_HEIGHT: f64 = 600.0;

/// Default contact threshold: maximum center-to-center distance counted as
/// a collision.
pub const DEFAULT_CONTACT_RADIUS: f64 = 5.0;

/// Default time from infection to recovery (time units).
pub const DEFAULT_RECOVERY_DURATION: f64 = 4.0;

/// Default body radius of every person (used for rendering size and for the
/// spawn inset from the walls).
pub const DEFAULT_BODY_RADIUS: f64 = 10.0;

/// Default simulated time per tick. Velocity is expressed in units per time
/// unit, so with a step of 1.0 it is added to position directly.
pub const DEFAULT_FIXED_STEP: f64 = 1.0;

/// Default reporter sampling interval (time units). Deliberately slower
/// than the tick cadence.
pub const DEFAULT_REPORT_INTERVAL: f64 = 2.0;

/// Default RNG seed. Same seed = same simulation.
pub const DEFAULT_SEED: u64 = 42;

// --- Speed profile component choice sets ---
//
// Velocity components are rolled per axis from one of these sets. The slow
// set is what a lockdown switches the population to.

/// Slow (lockdown) per-axis velocity choices.
pub const SLOW_COMPONENTS: &[f64] = &[-1.0, -0.5, 0.5, 1.0];

/// Normal per-axis velocity choices.
pub const NORMAL_COMPONENTS: &[f64] = &[-2.0, -0.5, 0.5, 2.0];

/// Fast per-axis velocity choices.
pub const FAST_COMPONENTS: &[f64] = &[-2.5, -0.75, 0.75, 2.5];
