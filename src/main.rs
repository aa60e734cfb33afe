//! Chase Trail headless driver
//!
//! Runs either scenario at the fixed timestep for a number of ticks and
//! reports what happened. Windowing and rendering are not part of this
//! binary; the trail game's own frame buffer is the only raster.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use chase_trail::consts::SIM_DT;
use chase_trail::sim::{ChaseInput, ChaseWorld, Monster, Player, RunSummary, TrailGame, TrailInput, run};
use chase_trail::{Settings, logging};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioKind {
    /// Monsters flee players, players absorb monsters, trees hide players
    Chase,
    /// Two riders leave trails and die on contact
    Trail,
}

/// Headless runner for the chase and trail simulations
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which scenario to run
    #[arg(value_enum)]
    scenario: ScenarioKind,

    /// Number of ticks to simulate (120 per simulated second)
    #[arg(short, long, default_value_t = 1200)]
    ticks: u64,

    /// Override the RNG seed from the settings
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Let the autopilot drive the players
    #[arg(short, long)]
    idle: bool,

    /// Print the final world as JSON
    #[arg(long)]
    dump: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    summary: &'a RunSummary,
    players: &'a [Player],
    #[serde(skip_serializing_if = "Option::is_none")]
    monsters: Option<&'a [Monster]>,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut settings = args.settings.as_deref().map(Settings::load).unwrap_or_default();
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }
    log::info!("Running {:?} for {} ticks with seed {}", args.scenario, args.ticks, settings.seed);

    let ticks = args.ticks;
    let idle_mode = args.idle;
    let last = |i: u64| i + 1 == ticks;

    let (summary, json) = match args.scenario {
        ScenarioKind::Chase => {
            let mut world = ChaseWorld::new(settings);
            let inputs = (0..ticks).map(|i| ChaseInput {
                idle_mode,
                quit: last(i),
                ..Default::default()
            });
            let summary = run(&mut world, inputs, SIM_DT);
            let json = snapshot_json(&Snapshot {
                summary: &summary,
                players: &world.players,
                monsters: Some(&world.monsters),
            });
            (summary, json)
        }
        ScenarioKind::Trail => {
            let mut game = TrailGame::new(settings);
            let inputs = (0..ticks).map(|i| TrailInput {
                idle_mode,
                quit: last(i),
                ..Default::default()
            });
            let summary = run(&mut game, inputs, SIM_DT);
            let json = snapshot_json(&Snapshot {
                summary: &summary,
                players: &game.players,
                monsters: None,
            });
            (summary, json)
        }
    };

    log::info!(
        "{} ticks: {} absorbed, {} deaths, {} respawns, {} bullets",
        summary.ticks,
        summary.monsters_absorbed,
        summary.deaths,
        summary.respawns,
        summary.bullets_fired
    );

    if args.dump {
        match json {
            Some(json) => println!("{json}"),
            None => log::warn!("Could not serialize final state"),
        }
    }
}

fn snapshot_json(snapshot: &Snapshot<'_>) -> Option<String> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| log::warn!("Snapshot serialization failed: {}", e))
        .ok()
}
