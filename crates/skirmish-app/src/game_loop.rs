//! Game loop thread: runs the simulation engine at the tick rate and hands
//! each snapshot to a sink.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skirmish_core::constants::TICK_RATE;
use skirmish_core::state::ArenaSnapshot;
use skirmish_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, LoopSettings};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// The sink sees every snapshot and returns `false` to stop the loop.
/// Returns the command sender and a handle that yields the number of
/// ticks run.
pub fn spawn_game_loop<F>(
    config: SimConfig,
    settings: LoopSettings,
    sink: F,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<u64>)>
where
    F: FnMut(&ArenaSnapshot) -> bool + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || run_game_loop(config, settings, cmd_rx, sink))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, the tick limit,
/// or the sink asks to stop.
pub fn run_game_loop<F>(
    config: SimConfig,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    mut sink: F,
) -> u64
where
    F: FnMut(&ArenaSnapshot) -> bool,
{
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;

    loop {
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            log::info!("tick limit reached after {ticks} ticks");
            return ticks;
        }

        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return ticks,
                Err(mpsc::TryRecvError::Empty) => break,
                // Sender gone: keep running only if a tick limit will end us.
                Err(mpsc::TryRecvError::Disconnected) => {
                    if settings.max_ticks.is_none() {
                        return ticks;
                    }
                    break;
                }
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Hand the snapshot to the consumer
        if !sink(&snapshot) {
            log::info!("snapshot sink closed after {ticks} ticks");
            return ticks;
        }

        if !settings.realtime {
            continue;
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind: reset to avoid catch-up spiral
            log::warn!("game loop fell behind, resetting pacing");
            next_tick_time = now;
        }
    }
}
