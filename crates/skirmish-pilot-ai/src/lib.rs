//! Pilot AI for SKIRMISH.
//!
//! Decision layer for autonomous actors (and the controlled actor while the
//! autopilot flies it): target selection, patrol, evasion and fire gating,
//! driven by per-kind behaviour profiles.

pub mod fsm;
pub mod profiles;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
