//! SKIRMISH headless runner.
//!
//! Runs the simulation engine on a dedicated game loop thread, feeds it
//! player commands over a channel, and hands every snapshot to a sink.

pub mod game_loop;
pub mod state;

pub use skirmish_core as core;
