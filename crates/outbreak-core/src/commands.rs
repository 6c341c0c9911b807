//! Run-control commands sent by the driving harness to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before the
//! system pipeline runs. Id-validated operations (seeding, vaccination) are
//! direct engine methods instead, so they can be rejected synchronously.

use serde::{Deserialize, Serialize};

use crate::enums::SpeedProfile;

/// All run-control actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineCommand {
    /// Suspend ticking; the clock does not advance while paused.
    Pause,
    /// Resume a paused run.
    Resume,
    /// Stop the run: the phase becomes Complete and later ticks are no-ops.
    Halt,
    /// Re-roll every person's velocity from the profile's choice set.
    /// `Slow` is the source's lockdown control.
    SetSpeedProfile { profile: SpeedProfile },
}
