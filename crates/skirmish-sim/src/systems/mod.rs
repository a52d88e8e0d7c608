//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only). They do not own state; all state lives in components, the
//! roster and the engine.

pub mod cleanup;
pub mod collision;
pub mod countermeasures;
pub mod lifecycle;
pub mod lock_on;
pub mod movement;
pub mod pilot_ai;
pub mod projectiles;
pub mod snapshot;
pub mod warning;
pub mod weapons;
