//! Rock Blast headless demo driver
//!
//! Runs a scripted session against the simulation core and logs what
//! happens. Useful for smoke-testing balance changes without a renderer:
//!
//! ```text
//! rock-blast [config.json] [seed]
//! ```

use rock_blast::config::GameConfig;
use rock_blast::sim::{GameEvent, GameOrchestrator, TickInput};

/// Fixed demo timestep (60 Hz).
const DT: f32 = 1.0 / 60.0;
/// Cap the run at ten minutes of simulated time.
const MAX_TICKS: u64 = 36_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path),
        None => GameConfig::default(),
    };
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut game = match GameOrchestrator::new(config, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("invalid config: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Rock Blast demo running with seed {seed}");

    for tick in 0..MAX_TICKS {
        let input = scripted_input(tick);
        game.update(DT, &input);

        for event in game.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => log::debug!("score: {score}"),
                GameEvent::LaserFired { origin, direction } => {
                    log::info!("laser fired from {origin} toward {direction}")
                }
                GameEvent::LaserChargesChanged(charges) => {
                    log::debug!("laser charges: {charges}")
                }
                GameEvent::PlayerDestroyed => log::info!("player destroyed"),
                GameEvent::GameOver => log::info!("game over"),
                GameEvent::GameRestarted => log::info!("session started"),
            }
        }

        if game.is_game_over() {
            let survived = tick as f32 * DT;
            log::info!(
                "final score {} after {survived:.1}s with {} entities on screen",
                game.score(),
                game.entity_snapshots().len()
            );
            return;
        }
    }

    log::info!("time limit reached, final score {}", game.score());
}

fn load_config(path: &str) -> GameConfig {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::error!("cannot read {path}: {e}");
            std::process::exit(1);
        }
    };
    match GameConfig::from_json_str(&json) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{path}: {e}");
            std::process::exit(1);
        }
    }
}

/// A simple pilot: weave, thrust in bursts, shoot steadily, lase rarely.
fn scripted_input(tick: u64) -> TickInput {
    TickInput {
        thrusting: tick % 120 < 45,
        rotation: if tick % 240 < 120 { 0.4 } else { -0.4 },
        fire_bullet: tick % 20 == 0,
        fire_laser: tick % 600 == 599,
        restart: false,
    }
}
