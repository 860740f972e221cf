//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a run can be retuned from
//! JSON without touching code. `Tuning::default()` is the stock game.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// How often new traffic appears
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Fixed chance every tick, regardless of how long the tick was
    PerTick { probability: f64 },
    /// Poisson arrivals at `rate` cars per second of wall-clock time
    PerSecond { rate: f64 },
}

impl SpawnPolicy {
    /// Chance of a spawn during a tick lasting `dt` seconds
    pub fn chance(&self, dt: f32) -> f64 {
        match *self {
            SpawnPolicy::PerTick { probability } => probability,
            SpawnPolicy::PerSecond { rate } => 1.0 - (-rate * dt.max(0.0) as f64).exp(),
        }
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::PerTick {
            probability: SPAWN_CHANCE_PER_TICK,
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub track_width: f32,
    pub track_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    pub player_base_speed: f32,
    pub player_max_speed: f32,
    pub boost_factor: f32,

    pub nitro_regen: f32,
    pub nitro_cost: f32,
    pub drift_angle: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub spawn: SpawnPolicy,

    pub difficulty_interval_secs: f32,
    pub difficulty_step: f32,

    pub trail_chance: f64,
    pub boost_burst_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            track_width: TRACK_WIDTH,
            track_height: TRACK_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_base_speed: PLAYER_BASE_SPEED,
            player_max_speed: PLAYER_MAX_SPEED,
            boost_factor: BOOST_FACTOR,

            nitro_regen: NITRO_REGEN,
            nitro_cost: NITRO_COST,
            drift_angle: DRIFT_ANGLE,

            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            spawn: SpawnPolicy::default(),

            difficulty_interval_secs: DIFFICULTY_INTERVAL_SECS,
            difficulty_step: DIFFICULTY_STEP,

            trail_chance: TRAIL_CHANCE,
            boost_burst_count: BOOST_BURST_COUNT,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Same tuning with spawning switched off (handy for scripted scenarios)
    pub fn without_traffic(mut self) -> Self {
        self.spawn = SpawnPolicy::PerTick { probability: 0.0 };
        self
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("track_width", self.track_width)?;
        positive("track_height", self.track_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("enemy_width", self.enemy_width)?;
        positive("enemy_height", self.enemy_height)?;
        positive("player_max_speed", self.player_max_speed)?;
        positive("difficulty_interval_secs", self.difficulty_interval_secs)?;

        if self.player_width > self.track_width {
            return Err(ConfigError::invalid("player_width", "wider than the track"));
        }
        if self.enemy_width > self.track_width {
            return Err(ConfigError::invalid("enemy_width", "wider than the track"));
        }
        if self.player_bottom_margin < 0.0 || self.player_bottom_margin > self.track_height {
            return Err(ConfigError::invalid(
                "player_bottom_margin",
                "must lie within the track height",
            ));
        }
        if !(self.enemy_min_speed > 0.0 && self.enemy_min_speed < self.enemy_max_speed) {
            return Err(ConfigError::invalid(
                "enemy_min_speed",
                format!(
                    "need 0 < min < max, got {}..{}",
                    self.enemy_min_speed, self.enemy_max_speed
                ),
            ));
        }
        if self.boost_factor < 1.0 {
            return Err(ConfigError::invalid("boost_factor", "must be at least 1.0"));
        }
        if self.nitro_regen < 0.0 || self.nitro_cost < 0.0 {
            return Err(ConfigError::invalid("nitro_cost", "nitro rates cannot be negative"));
        }
        if self.difficulty_step < 0.0 {
            return Err(ConfigError::invalid(
                "difficulty_step",
                "difficulty must never decrease",
            ));
        }
        if !(0.0..=1.0).contains(&self.trail_chance) {
            return Err(ConfigError::invalid("trail_chance", "must be in [0, 1]"));
        }
        match self.spawn {
            SpawnPolicy::PerTick { probability } if !(0.0..=1.0).contains(&probability) => {
                Err(ConfigError::invalid("spawn", "probability must be in [0, 1]"))
            }
            SpawnPolicy::PerSecond { rate } if !(rate >= 0.0 && rate.is_finite()) => {
                Err(ConfigError::invalid("spawn", "rate must be finite and non-negative"))
            }
            _ => Ok(()),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}
