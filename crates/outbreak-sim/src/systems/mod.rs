//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only aggregation). They do not own state — all state lives in
//! components or the engine.

pub mod collision;
pub mod contagion;
pub mod mixing;
pub mod movement;
pub mod report;
pub mod snapshot;
pub mod walls;
