//! Game session state and core simulation types
//!
//! Everything a run needs lives in `GameSession`; a reset replaces it wholesale.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyScaler;
use super::particle::Particle;
use super::spawner::Spawner;
use super::vehicle::{Body, Enemy, Player};
use crate::consts::LANE_MARKINGS;
use crate::settings::Settings;
use crate::sprites::{SolidCatalog, SpriteTable};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Driving
    Running,
    /// Crashed; only `reset` leaves this phase
    GameOver,
}

/// Things the presentation layer reacts to, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fresh session (new or reset)
    SessionStarted,
    /// An enemy left the bottom of the track
    EnemyPassed { score: u32 },
    /// Player hit an enemy; fired once
    Crash { final_score: u32 },
    /// Nitro started burning this tick
    BoostEngaged,
    /// Steering this tick (repeats while held)
    Drifting { angle: f32 },
    /// Steering stopped this tick
    DriftEnded,
    DifficultyIncreased { multiplier: f32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the RNG started from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub sprites: SpriteTable,
    pub(crate) spawner: Spawner,
    pub difficulty: DifficultyScaler,
    /// Particle cap per collection
    pub max_particles: usize,
    pub trails: bool,

    pub phase: GamePhase,
    pub score: u32,
    /// Total road covered (telemetry only)
    pub distance: f32,
    /// Simulation tick counter
    pub time_ticks: u64,

    pub player: Player,
    /// Live traffic, in spawn order
    pub enemies: Vec<Enemy>,
    /// Nitro burst particles
    pub particles: Vec<Particle>,
    /// Lane marking positions (x fixed, y scrolls)
    pub lane_markings: Vec<Vec2>,

    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Stock game: default tuning, solid sprites, default settings
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        let sprites = SpriteTable::resolve(&SolidCatalog, &tuning);
        Self::with_config(seed, tuning, sprites, &Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, sprites: SpriteTable, settings: &Settings) -> Self {
        let player = fresh_player(&tuning, &sprites);
        let lane_markings = fresh_lane_markings(&tuning);
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawner: Spawner::new(&tuning),
            difficulty: DifficultyScaler::new(
                tuning.difficulty_interval_secs,
                tuning.difficulty_step,
            ),
            max_particles: settings.max_particles(),
            trails: settings.trails_enabled(),
            tuning,
            sprites,

            phase: GamePhase::Running,
            score: 0,
            distance: 0.0,
            time_ticks: 0,

            player,
            enemies: Vec::new(),
            particles: Vec::new(),
            lane_markings,

            events: Vec::new(),
            next_id: 1,
        };
        log::info!("Session started (seed {})", seed);
        session.events.push(GameEvent::SessionStarted);
        session
    }

    /// Start over: fresh player, no traffic, score 0, difficulty 1.0.
    /// Configuration and the RNG stream carry over.
    pub fn reset(&mut self) {
        log::info!("Session reset (previous score {})", self.score);
        self.player = fresh_player(&self.tuning, &self.sprites);
        self.lane_markings = fresh_lane_markings(&self.tuning);
        self.difficulty = DifficultyScaler::new(
            self.tuning.difficulty_interval_secs,
            self.tuning.difficulty_step,
        );
        self.phase = GamePhase::Running;
        self.score = 0;
        self.distance = 0.0;
        self.time_ticks = 0;
        self.enemies.clear();
        self.particles.clear();
        self.events.clear();
        self.events.push(GameEvent::SessionStarted);
    }

    /// Apply new presentation settings (particle cap, trails)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.max_particles = settings.max_particles();
        self.trails = settings.trails_enabled();
        self.particles.truncate(self.max_particles);
        self.player.trail.truncate(self.max_particles);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Current traffic speed multiplier
    pub fn difficulty_multiplier(&self) -> f32 {
        self.difficulty.multiplier()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a car at `pos` with the given cruising speed, scaled to the
    /// current difficulty. Returns its ID.
    pub fn insert_enemy(&mut self, pos: Vec2, base_speed: f32, variant: u8) -> u32 {
        let id = self.next_entity_id();
        let size = Vec2::new(self.tuning.enemy_width, self.tuning.enemy_height);
        let mut enemy = Enemy {
            id,
            body: Body::new(pos, size, self.sprites.enemy(variant), base_speed),
            variant,
        };
        enemy.rescale(self.difficulty.multiplier());
        self.enemies.push(enemy);
        id
    }

    /// Roll a random car into the traffic
    pub(crate) fn spawn_enemy(&mut self) {
        let id = self.next_entity_id();
        let enemy = self.spawner.spawn(
            &mut self.rng,
            id,
            self.difficulty.multiplier(),
            &self.sprites,
        );
        self.enemies.push(enemy);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn fresh_player(tuning: &Tuning, sprites: &SpriteTable) -> Player {
    let pos = Vec2::new(
        (tuning.track_width / 2.0).min(tuning.track_width - tuning.player_width),
        tuning.track_height - tuning.player_bottom_margin,
    );
    let size = Vec2::new(tuning.player_width, tuning.player_height);
    let body = Body::new(pos, size, sprites.player, tuning.player_base_speed);
    Player::new(body, tuning.player_max_speed)
}

fn fresh_lane_markings(tuning: &Tuning) -> Vec<Vec2> {
    let spacing = tuning.track_width / (LANE_MARKINGS + 1) as f32;
    (1..=LANE_MARKINGS)
        .map(|i| Vec2::new((spacing * i as f32).floor(), 0.0))
        .collect()
}
