//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world and the actor roster, runs systems at a fixed
//! tick rate, and produces `ArenaSnapshot`s for consumers.

pub mod controls;
pub mod engine;
pub mod roster;
pub mod score;
pub mod steering;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skirmish_core as core;
