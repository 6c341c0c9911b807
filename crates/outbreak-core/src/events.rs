//! Events emitted by the simulation for harness feedback.
//!
//! A display harness reacts to these instead of polling every person for
//! status changes (the source demos flip indicator colors on transition).

use serde::{Deserialize, Serialize};

use crate::enums::SpeedProfile;

/// State transitions that occurred during a tick, in occurrence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HealthEvent {
    /// A susceptible person became infectious.
    Infected { id: u32, tick: u64 },
    /// An infectious person's recovery deadline elapsed.
    Recovered { id: u32, tick: u64 },
    /// A person was vaccinated.
    Vaccinated { id: u32, tick: u64 },
    /// The population's speed profile was changed.
    SpeedProfileChanged { profile: SpeedProfile, tick: u64 },
    /// No infectious entities remain after a prior non-zero sample.
    RunComplete { tick: u64 },
}
