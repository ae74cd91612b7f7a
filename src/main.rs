//! Apple Archer entry point
//!
//! Native builds run a headless autoplay session: the autopilot plans each
//! shot, feeds the drag gesture through the normal input path, and the frame
//! loop runs on a simulated 60 Hz clock until the arrows run out.

use std::path::{Path, PathBuf};

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use apple_archer::consts::FRAME_MS;
use apple_archer::platform::{self, MemoryStorage, Storage};
use apple_archer::sim::{GameEvent, GamePhase, ShotPlan, plan_shot};
use apple_archer::{Game, GameConfig};

/// Where the simulated finger starts every drag
const DRAG_ANCHOR: Vec2 = Vec2::new(200.0, 350.0);

/// Frames the session may run before giving up
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Parser, Debug)]
#[command(name = "apple-archer")]
#[command(about = "Headless Apple Archer session played by the autopilot")]
struct Cli {
    /// RNG seed for stump heights and wind
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Stop after this many shots
    #[arg(long, default_value_t = 25)]
    shots: u32,
    /// Chance (0..=1) that a planned shot is fired unspoiled
    #[arg(long, default_value_t = 0.8, value_parser = parse_accuracy)]
    accuracy: f64,
    /// JSON file overriding any subset of the game config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for the persisted leaderboard (in-memory when omitted)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Print a JSON snapshot at the start of every round
    #[arg(long)]
    json: bool,
}

fn parse_accuracy(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=1"))
    }
}

fn load_config(path: Option<&Path>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match std::fs::read_to_string(path).map(|json| GameConfig::from_json(&json)) {
        Ok(Ok(config)) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Ok(Err(e)) => {
            log::error!("Invalid config {}: {}; using defaults", path.display(), e);
            GameConfig::default()
        }
        Err(e) => {
            log::error!("Could not read config {}: {}; using defaults", path.display(), e);
            GameConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_storage(_data_dir: Option<&Path>) -> Box<dyn Storage> {
    Box::new(platform::storage::LocalStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn open_storage(data_dir: Option<&Path>) -> Box<dyn Storage> {
    match data_dir {
        Some(dir) => Box::new(platform::storage::FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    }
}

/// Deliberately spoil some shots so sessions end
fn wobble(plan: ShotPlan, rng: &mut Pcg32, accuracy: f64) -> ShotPlan {
    if rng.random_bool(accuracy) {
        return plan;
    }
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    ShotPlan {
        power: plan.power + sign * rng.random_range(8.0..20.0),
        ..plan
    }
}

fn main() {
    platform::init_logging();
    let opts = Cli::parse();

    let config = load_config(opts.config.as_deref());
    let fallback = ShotPlan {
        anchor: DRAG_ANCHOR,
        angle: -std::f32::consts::FRAC_PI_4,
        power: config.max_power_drag,
    };
    let storage = open_storage(opts.data_dir.as_deref());
    let mut game = Game::new(config, opts.seed, storage);
    let mut rng = Pcg32::seed_from_u64(opts.seed ^ 0x5eed);

    let mut shots = 0;
    let mut needs_plan = true;

    for frame in 0..MAX_FRAMES {
        if needs_plan && game.state().phase == GamePhase::Aiming {
            if shots >= opts.shots {
                log::info!("Shot limit reached");
                break;
            }
            let plan = plan_shot(game.state(), DRAG_ANCHOR, 1.0).unwrap_or_else(|| {
                log::warn!("Autopilot found no hit; firing blind");
                fallback
            });
            let plan = wobble(plan, &mut rng, opts.accuracy);
            for event in plan.gesture() {
                game.pointer(event);
            }
            shots += 1;
            needs_plan = false;
        }

        let report = game.frame(frame as f64 * FRAME_MS as f64);
        for event in &report.events {
            match event {
                GameEvent::RoundStarted { .. } => {
                    needs_plan = true;
                    if opts.json {
                        match serde_json::to_string(&game.snapshot()) {
                            Ok(line) => println!("{line}"),
                            Err(e) => log::error!("Snapshot serialization failed: {}", e),
                        }
                    }
                }
                // Spoiled drag released inside the start circle
                GameEvent::ShotCancelled => needs_plan = true,
                GameEvent::GameOver { score } => {
                    println!("Game over! Final score: {score}");
                    if let Some(rank) = report.final_rank {
                        println!("New high score, rank #{rank}");
                    }
                }
                _ => {}
            }
        }
        if game.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let state = game.state();
    println!(
        "Seed: {}  Ticks: {}  Shots: {}  Score: {}  Arrows left: {}  Wind: {:+.3}",
        state.seed, state.time_ticks, shots, state.score, state.arrows_remaining, state.wind.force
    );
    let scores = game.leaderboard().scores();
    if scores.is_empty() {
        println!("No high scores yet");
    } else {
        println!("Top scores: {:?}", scores.entries);
    }
}
