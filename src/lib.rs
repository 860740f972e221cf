//! Retro Racing - A top-down arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicles, spawning, collisions, game state)
//! - `sprites`: Content boxes supplied by the asset layer
//! - `platform`: Frame clock, fixed timestep, key edge detection
//! - `audio`: Routes simulation events to an injected sound sink
//! - `tuning`: Data-driven game balance
//! - `game`: Frame driver tying the pieces together

pub mod audio;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod sprites;
pub mod tuning;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the spawn odds are tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the accumulator will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Track (visible area) dimensions
    pub const TRACK_WIDTH: f32 = 1024.0;
    pub const TRACK_HEIGHT: f32 = 768.0;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 140.0;
    /// Distance from the player's top edge to the bottom of the track
    pub const PLAYER_BOTTOM_MARGIN: f32 = 150.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_SPEED: f32 = 12.0;
    /// Speed multiplier while nitro burns
    pub const BOOST_FACTOR: f32 = 1.5;

    /// Nitro tank
    pub const NITRO_MAX: f32 = 100.0;
    pub const NITRO_REGEN: f32 = 0.1;
    pub const NITRO_COST: f32 = 1.0;

    /// Sprite rotation while steering (degrees)
    pub const DRIFT_ANGLE: f32 = 15.0;

    /// Traffic
    pub const ENEMY_WIDTH: f32 = 160.0;
    pub const ENEMY_HEIGHT: f32 = 160.0;
    pub const ENEMY_MIN_SPEED: f32 = 3.0;
    pub const ENEMY_MAX_SPEED: f32 = 7.0;
    pub const ENEMY_VARIANTS: u8 = 4;
    pub const SPAWN_CHANCE_PER_TICK: f64 = 0.02;

    /// Difficulty ramp
    pub const DIFFICULTY_INTERVAL_SECS: f32 = 5.0;
    pub const DIFFICULTY_STEP: f32 = 0.2;

    /// Particles
    pub const TRAIL_CHANCE: f64 = 0.3;
    pub const BOOST_BURST_COUNT: u32 = 3;
    /// Life (ticks) that maps to a fully opaque particle
    pub const PARTICLE_FULL_LIFE: f32 = 40.0;
    pub const PARTICLE_SHRINK: f32 = 0.1;

    /// Number of evenly spaced lane markings
    pub const LANE_MARKINGS: usize = 3;
}
