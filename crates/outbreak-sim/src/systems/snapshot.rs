//! Snapshot system: queries the world and builds a complete SimSnapshot.
//!
//! Read-only — it never modifies the world, and the snapshot owns all of
//! its data (nothing aliases engine internals).

use hecs::World;

use outbreak_core::components::{Body, Health, PersonId};
use outbreak_core::enums::RunPhase;
use outbreak_core::events::HealthEvent;
use outbreak_core::state::{PersonView, SimSnapshot, StatusReport};
use outbreak_core::types::{Position, SimTime};

/// Build a complete snapshot from the current world state.
pub fn build(
    world: &World,
    time: &SimTime,
    phase: RunPhase,
    report: StatusReport,
    events: Vec<HealthEvent>,
) -> SimSnapshot {
    let mut people: Vec<PersonView> = world
        .query::<(&PersonId, &Position, &Body, &Health)>()
        .iter()
        .map(|(_, (id, pos, body, health))| PersonView {
            id: id.0,
            x: pos.x,
            y: pos.y,
            radius: body.radius,
            status: health.status,
        })
        .collect();
    people.sort_by_key(|p| p.id);

    SimSnapshot {
        time: *time,
        phase,
        people,
        report,
        events,
    }
}
