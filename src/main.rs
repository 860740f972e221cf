//! Retro Racing headless entry point
//!
//! Runs the simulation with a simple autopilot at a fixed 60 Hz and prints
//! the final frame as JSON. Rendering frontends drive `Game` the same way.
//!
//! Usage: retro-racing [seed] [seconds] [tuning.json]
//! Set `RETRO_REALTIME=1` to pace frames against the wall clock and
//! `RETRO_QUALITY=low|medium|high` to pick the particle budget.

use retro_racing::audio::LogSink;
use retro_racing::consts::SIM_DT;
use retro_racing::platform::{FrameClock, KeyState, time::tick_duration};
use retro_racing::sim::{FrameSnapshot, GameSession};
use retro_racing::sprites::{SolidCatalog, SpriteTable};
use retro_racing::{Game, QualityPreset, Settings, Tuning};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let tuning = args.next().map(|path| load_tuning(&path)).unwrap_or_default();

    log::info!("Retro Racing (headless) starting, seed {}", seed);

    let sprites = SpriteTable::resolve(&SolidCatalog, &tuning);
    let settings = std::env::var("RETRO_QUALITY")
        .map(|name| load_settings(&name))
        .unwrap_or_default();
    let session = GameSession::with_config(seed, tuning, sprites, &settings);
    let mut game = Game::new(session, LogSink::default(), settings);

    let realtime = std::env::var("RETRO_REALTIME").is_ok_and(|v| v == "1");
    let mut clock = FrameClock::new();
    let frames = (seconds / SIM_DT) as u32;
    for _ in 0..frames {
        if game.session.is_game_over() {
            break;
        }
        let keys = autopilot(&game.snapshot());
        let dt = if realtime {
            std::thread::sleep(tick_duration());
            clock.frame()
        } else {
            SIM_DT
        };
        game.frame(dt, keys);
    }
    game.shutdown();

    let snapshot = game.snapshot();
    log::info!(
        "Finished: score {}, distance {:.0}, difficulty {:.1}x{}",
        snapshot.score,
        snapshot.distance,
        snapshot.difficulty_multiplier,
        if snapshot.game_over { " (crashed)" } else { "" }
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

/// Load tuning from a JSON file, falling back to defaults
fn load_tuning(path: &str) -> Tuning {
    match Tuning::load(path) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Couldn't load tuning from {}: {} - using defaults", path, e);
            Tuning::default()
        }
    }
}

/// Settings for a named quality preset, falling back to defaults
fn load_settings(name: &str) -> Settings {
    match name.parse::<QualityPreset>() {
        Ok(preset) => {
            log::info!("Quality preset {}", preset);
            Settings::from_preset(preset)
        }
        Err(e) => {
            log::warn!("{} - using {} quality", e, QualityPreset::default());
            Settings::default()
        }
    }
}

/// Steer away from the nearest car ahead in our column; burn nitro when clear
fn autopilot(frame: &FrameSnapshot) -> KeyState {
    let me = &frame.player;
    let (left, right) = (me.pos.x, me.pos.x + me.size.x);
    let center = (left + right) / 2.0;

    let threat = frame
        .enemies
        .iter()
        .filter(|e| e.pos.y + e.size.y > me.pos.y - 400.0 && e.pos.y < me.pos.y + me.size.y)
        .filter(|e| e.pos.x < right + 20.0 && e.pos.x + e.size.x > left - 20.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    match threat {
        Some(enemy) => {
            let enemy_center = enemy.pos.x + enemy.size.x / 2.0;
            let go_left = if enemy.pos.x < 40.0 + me.size.x {
                false
            } else if enemy.pos.x + enemy.size.x > frame.track.x - 40.0 - me.size.x {
                true
            } else {
                center < enemy_center
            };
            KeyState {
                left: go_left,
                right: !go_left,
                boost: false,
            }
        }
        None => KeyState {
            boost: me.nitro > 50.0,
            ..Default::default()
        },
    }
}
