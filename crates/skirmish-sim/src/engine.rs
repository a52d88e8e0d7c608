//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the actor roster,
//! processes player commands, runs all systems, and produces
//! `ArenaSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::Tuning;
use skirmish_core::enums::GamePhase;
use skirmish_core::events::SimEvent;
use skirmish_core::state::ArenaSnapshot;
use skirmish_core::types::SimTime;

use crate::controls::ControlState;
use crate::roster::Roster;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::warning::MissileWarning;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    roster: Roster,
    tuning: Tuning,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    controls: ControlState,
    autopilot: bool,
    missile_warning: MissileWarning,
    next_decoy_id: u32,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            roster: Roster::new(),
            tuning: config.tuning,
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            controls: ControlState::default(),
            autopilot: false,
            missile_warning: MissileWarning::default(),
            next_decoy_id: 0,
            score: ScoreState::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }
        self.controls.end_tick();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &SnapshotContext {
                time: self.time,
                phase: self.phase,
                autopilot: self.autopilot,
                missile_warning: self.missile_warning.active(),
                tuning: &self.tuning,
                score: &self.score,
            },
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        if self.controls.apply(&command) {
            return;
        }
        match command {
            PlayerCommand::StartMission => {
                if self.phase == GamePhase::Briefing {
                    world_setup::setup_arena(&mut self.world, &mut self.roster, &self.tuning, &mut self.rng);
                    self.phase = GamePhase::Active;
                    self.time = SimTime::default();
                    self.score = ScoreState::default();
                    self.controls.release_all();
                    self.missile_warning = MissileWarning::default();
                    self.next_decoy_id = 0;
                    log::debug!("mission started with {} actors", self.roster.len());
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                self.controls.release_all();
                self.events.push(SimEvent::AutopilotToggled {
                    enabled: self.autopilot,
                });
                log::debug!("autopilot {}", if self.autopilot { "on" } else { "off" });
            }
            // Player controls are latched by `ControlState::apply` above.
            PlayerCommand::TurnLeft { .. }
            | PlayerCommand::TurnRight { .. }
            | PlayerCommand::ThrottleUp { .. }
            | PlayerCommand::ThrottleDown { .. }
            | PlayerCommand::FireGun { .. }
            | PlayerCommand::FireMissile
            | PlayerCommand::DeployDecoys => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;
        // 1. Lifecycle (deaths seen last tick, respawns, takeoffs)
        systems::lifecycle::run(
            &mut self.world,
            &mut self.roster,
            &self.tuning,
            &mut self.rng,
            &mut self.events,
            &mut self.score,
        );
        // 2. Countermeasures (cooldowns, burst requests, pair release)
        systems::countermeasures::run(
            &mut self.world,
            &self.roster,
            &mut self.controls,
            self.autopilot,
            &mut self.rng,
            &mut self.next_decoy_id,
            &mut self.events,
        );
        // 3. Lock-on for every actor
        systems::lock_on::run(&mut self.world, &self.roster, &self.tuning, &mut self.events);
        // 4. Pilot orders (decision layer or player controls)
        systems::pilot_ai::run(
            &mut self.world,
            &self.roster,
            &self.tuning,
            &mut self.controls,
            self.autopilot,
            &mut self.rng,
            tick,
        );
        // 5. Actor movement and separation
        systems::movement::run(&mut self.world, &self.roster, &self.tuning, self.autopilot);
        // 6. Weapons (cooldowns, regeneration, fire)
        systems::weapons::run(
            &mut self.world,
            &self.roster,
            &self.tuning,
            &mut self.controls,
            self.autopilot,
            &mut self.rng,
            &mut self.events,
        );
        // 7. Projectile motion (bullets, missile guidance, decoys)
        systems::projectiles::run(&mut self.world, &self.tuning, &mut self.rng);
        // 8. Collision and damage
        systems::collision::run(&mut self.world, tick, &mut self.events, &mut self.despawn_buffer);
        // 9. Cleanup (expired projectiles and decoys)
        systems::cleanup::run(&mut self.world, &self.tuning, &mut self.events, &mut self.despawn_buffer);
        // 10. Incoming-missile warning
        systems::warning::run(&self.world, &mut self.missile_warning, &mut self.events);
    }
}
