//! Headless SKIRMISH runner: plays a sortie and prints snapshots as JSON
//! lines on stdout.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use skirmish_app::game_loop;
use skirmish_app::state::{GameLoopCommand, LoopSettings};
use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::Tuning;
use skirmish_sim::engine::SimConfig;

#[derive(Parser, Debug)]
#[clap(name = "skirmish", about = "Arena air-combat simulation")]
struct Arguments {
    /// JSON tuning file; missing fields keep their defaults.
    #[clap(long, value_parser)]
    config: Option<PathBuf>,

    #[clap(long, value_parser, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks (0 runs until stdin closes).
    #[clap(long, value_parser, default_value_t = 3600)]
    ticks: u64,

    /// Print every n-th snapshot.
    #[clap(long, value_parser, default_value_t = 1)]
    snapshot_every: u64,

    /// Pace ticks at the nominal tick rate instead of running flat out.
    #[clap(long)]
    realtime: bool,

    /// Hand the controlled actor to the autopilot from the start.
    #[clap(long)]
    autopilot: bool,

    /// Read player commands as JSON lines from stdin.
    #[clap(long)]
    stdin: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("skirmish=info")).init();

    let args = Arguments::parse();
    let tuning = match &args.config {
        Some(path) => Tuning::load(path).with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    log::info!(
        "seed {}, {} allies vs {} opponents",
        args.seed,
        tuning.ally_count,
        tuning.opponent_count
    );

    let config = SimConfig {
        seed: args.seed,
        tuning,
        ..Default::default()
    };
    let settings = LoopSettings {
        realtime: args.realtime,
        max_ticks: (args.ticks > 0).then_some(args.ticks),
    };

    let every = args.snapshot_every.max(1);
    let stdout = std::io::stdout();
    let sink = move |snapshot: &skirmish_core::state::ArenaSnapshot| {
        if snapshot.time.tick % every != 0 {
            return true;
        }
        let mut out = stdout.lock();
        match serde_json::to_writer(&mut out, snapshot) {
            Ok(()) => writeln!(out).is_ok(),
            Err(err) => {
                log::error!("writing snapshot: {err}");
                false
            }
        }
    };

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, settings, sink).context("spawning game loop thread")?;

    let mut opening = vec![PlayerCommand::StartMission];
    if args.autopilot {
        opening.push(PlayerCommand::ToggleAutopilot);
    }
    for cmd in opening {
        cmd_tx
            .send(GameLoopCommand::PlayerCommand(cmd))
            .context("game loop stopped before the mission started")?;
    }

    if args.stdin {
        forward_stdin_commands(&cmd_tx);
        if settings.max_ticks.is_none() {
            let _ = cmd_tx.send(GameLoopCommand::Shutdown);
        }
    }
    // A closed channel ends an unbounded loop.
    drop(cmd_tx);

    let ticks = handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;
    log::info!("finished after {ticks} ticks");
    Ok(())
}

/// Forward JSON-line commands until stdin closes or the loop goes away.
fn forward_stdin_commands(cmd_tx: &std::sync::mpsc::Sender<GameLoopCommand>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::warn!("reading stdin: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayerCommand>(&line) {
            Ok(cmd) => {
                if cmd_tx.send(GameLoopCommand::PlayerCommand(cmd)).is_err() {
                    break;
                }
            }
            Err(err) => log::warn!("ignoring command {line:?}: {err}"),
        }
    }
}
