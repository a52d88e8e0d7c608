//! Stable actor table.
//!
//! Actors are never despawned: each one owns a roster slot for the whole
//! session and is recycled in place when it dies. The slot's generation
//! counter is bumped at death, which turns every `ActorHandle` taken from
//! the previous incarnation into a dangling handle that resolves to nothing.

use hecs::{Entity, World};

use skirmish_core::components::{FlightStatus, Health, Identity, Kinematics};
use skirmish_core::constants::SPEED_SCALE;
use skirmish_core::enums::{ActorKind, FlightPhase, Team};
use skirmish_core::types::{ActorHandle, Position};

#[derive(Debug, Clone, Copy)]
struct RosterSlot {
    entity: Entity,
    generation: u32,
}

#[derive(Debug, Default)]
pub struct Roster {
    slots: Vec<RosterSlot>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly spawned actor. Returns its slot.
    pub fn push(&mut self, entity: Entity) -> u32 {
        self.slots.push(RosterSlot {
            entity,
            generation: 0,
        });
        (self.slots.len() - 1) as u32
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entity in a slot, regardless of generation.
    pub fn entity(&self, slot: u32) -> Option<Entity> {
        self.slots.get(slot as usize).map(|s| s.entity)
    }

    /// Handle to the current incarnation of a slot.
    pub fn handle(&self, slot: u32) -> Option<ActorHandle> {
        self.slots
            .get(slot as usize)
            .map(|s| ActorHandle::new(slot, s.generation))
    }

    /// Entity behind a handle, if the handle is still current.
    pub fn resolve(&self, handle: ActorHandle) -> Option<Entity> {
        self.slots
            .get(handle.slot as usize)
            .filter(|s| s.generation == handle.generation)
            .map(|s| s.entity)
    }

    pub fn is_current(&self, handle: ActorHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Invalidate every handle to the slot's current incarnation.
    /// Returns the handle of the next incarnation.
    pub fn bump_generation(&mut self, slot: u32) -> Option<ActorHandle> {
        let entry = self.slots.get_mut(slot as usize)?;
        entry.generation = entry.generation.wrapping_add(1);
        Some(ActorHandle::new(slot, entry.generation))
    }

    /// `(slot, entity)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, s)| (slot as u32, s.entity))
    }
}

/// Read-only per-tick view of one actor, used by systems that need to look
/// at every other actor (targeting, collision, decision inputs).
#[derive(Debug, Clone, Copy)]
pub struct ActorSummary {
    pub entity: Entity,
    pub handle: ActorHandle,
    pub kind: ActorKind,
    pub team: Team,
    pub position: Position,
    pub heading: f64,
    /// Distance covered per tick at the current throttle.
    pub speed: f64,
    pub health: f64,
    pub phase: FlightPhase,
}

impl ActorSummary {
    /// Airborne with health left: targetable, collidable, able to fight.
    pub fn is_live(&self) -> bool {
        self.phase == FlightPhase::Airborne && self.health > 0.0
    }
}

/// Summaries of every actor, in roster slot order.
pub fn collect_actors(world: &World) -> Vec<ActorSummary> {
    let mut actors: Vec<ActorSummary> = world
        .query::<(&Identity, &Position, &Kinematics, &Health, &FlightStatus)>()
        .iter()
        .map(|(entity, (id, pos, kin, health, flight))| ActorSummary {
            entity,
            handle: id.handle(),
            kind: id.kind,
            team: id.team,
            position: *pos,
            heading: kin.heading,
            speed: kin.throttle * SPEED_SCALE,
            health: health.current,
            phase: flight.phase,
        })
        .collect();
    actors.sort_by_key(|a| a.handle.slot);
    actors
}

/// Resolve a handle to a live actor's summary.
pub fn find_live(actors: &[ActorSummary], handle: ActorHandle) -> Option<&ActorSummary> {
    actors
        .get(handle.slot as usize)
        .filter(|a| a.handle == handle && a.is_live())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bumped_generation_invalidates_old_handles() {
        let mut world = World::new();
        let mut roster = Roster::new();
        let e = world.spawn((0u8,));
        let slot = roster.push(e);

        let old = roster.handle(slot).unwrap();
        assert_eq!(roster.resolve(old), Some(e));

        let new = roster.bump_generation(slot).unwrap();
        assert_ne!(old, new);
        assert_eq!(roster.resolve(old), None);
        assert_eq!(roster.resolve(new), Some(e));
        assert!(!roster.is_current(old));
    }

    #[test]
    fn test_unknown_slot_resolves_to_nothing() {
        let roster = Roster::new();
        assert!(roster.resolve(ActorHandle::new(3, 0)).is_none());
        assert!(roster.handle(3).is_none());
    }
}
