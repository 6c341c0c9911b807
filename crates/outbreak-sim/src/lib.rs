//! Contagion simulation engine.
//!
//! Owns the hecs ECS world, advances it one fixed step per tick, and
//! produces SimSnapshots for the caller. Completely headless: rendering,
//! input, and frame scheduling are the caller's problem.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, Simulation};
pub use outbreak_core as core;

#[cfg(test)]
mod tests;
