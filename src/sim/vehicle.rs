//! Vehicles: a shared body plus the player-only control component

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use super::particle::{Particle, TRAIL_COLOR, push_capped, update_particles};
use crate::consts::NITRO_MAX;
use crate::sprites::ContentBox;

/// Movable, collidable part common to every car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left of the nominal sprite box
    pub pos: Vec2,
    /// Nominal sprite size
    pub size: Vec2,
    /// Opaque region inside the sprite (collision only)
    pub content_box: ContentBox,
    pub base_speed: f32,
    pub speed: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, content_box: ContentBox, base_speed: f32) -> Self {
        Self {
            pos,
            size,
            content_box: content_box.fit_within(size.x, size.y),
            base_speed,
            speed: base_speed,
        }
    }

    /// World-space collision rectangle
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.pos + self.content_box.offset, self.content_box.size)
    }
}

/// Oncoming traffic. Speed is uncapped: always `base_speed * multiplier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    /// Sprite variant, 1-based
    pub variant: u8,
}

impl Enemy {
    /// Drive straight down the screen
    pub fn advance(&mut self) {
        self.body.pos.y += self.body.speed;
    }

    /// Re-derive speed from the current difficulty
    pub fn rescale(&mut self, multiplier: f32) {
        self.body.speed = self.body.base_speed * multiplier;
    }
}

/// Steering direction for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Straight,
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub max_speed: f32,
    /// Boost resource, 0..=100
    pub nitro: f32,
    /// Burned nitro this tick
    pub boosting: bool,
    pub drifting: bool,
    /// Sprite rotation in degrees (positive = counter-clockwise)
    pub drift_angle: f32,
    /// Exhaust trail (owned by the car)
    #[serde(skip)]
    pub trail: Vec<Particle>,
}

impl Player {
    pub fn new(body: Body, max_speed: f32) -> Self {
        Self {
            body,
            max_speed,
            nitro: NITRO_MAX,
            boosting: false,
            drifting: false,
            drift_angle: 0.0,
            trail: Vec::new(),
        }
    }

    /// Pick a direction from the held keys. Left wins when both are held;
    /// a key pushing into the wall it already touches is ignored.
    pub fn resolve_steer(&self, left: bool, right: bool, track_width: f32) -> Steer {
        let max_x = (track_width - self.body.size.x).max(0.0);
        if left && self.body.pos.x > 0.0 {
            Steer::Left
        } else if right && self.body.pos.x < max_x {
            Steer::Right
        } else {
            Steer::Straight
        }
    }

    /// Slide sideways by the current speed, staying on the track
    pub fn steer(&mut self, steer: Steer, track_width: f32, drift_angle: f32) {
        let max_x = (track_width - self.body.size.x).max(0.0);
        let dx = match steer {
            Steer::Left => -self.body.speed,
            Steer::Right => self.body.speed,
            Steer::Straight => 0.0,
        };
        self.body.pos.x = (self.body.pos.x + dx).clamp(0.0, max_x);
        (self.drifting, self.drift_angle) = match steer {
            Steer::Left => (true, drift_angle),
            Steer::Right => (true, -drift_angle),
            Steer::Straight => (false, 0.0),
        };
    }

    /// Set this tick's speed. Returns true if nitro was burned.
    pub fn throttle(&mut self, boost_held: bool, boost_factor: f32, nitro_cost: f32) -> bool {
        self.boosting = boost_held && self.nitro > 0.0;
        if self.boosting {
            self.body.speed = self.max_speed * boost_factor;
            self.nitro = (self.nitro - nitro_cost).clamp(0.0, NITRO_MAX);
        } else {
            self.body.speed = self.max_speed;
        }
        self.boosting
    }

    /// Passive refill, skipped on ticks that burned nitro
    pub fn apply_nitro_regen(&mut self, regen: f32) {
        if !self.boosting && self.nitro < NITRO_MAX {
            self.nitro = (self.nitro + regen).min(NITRO_MAX);
        }
    }

    /// Bottom-center of the sprite, where exhaust comes out
    pub fn exhaust(&self) -> Vec2 {
        self.body.pos + Vec2::new(self.body.size.x / 2.0, self.body.size.y)
    }

    /// Maybe emit one trail particle
    pub fn spawn_trail_particle<R: Rng>(&mut self, rng: &mut R, chance: f64, cap: usize) {
        if rng.random_bool(chance) {
            let particle = Particle::spawn(self.exhaust(), TRAIL_COLOR, rng);
            push_capped(&mut self.trail, particle, cap);
        }
    }

    /// Per-tick upkeep. The player never moves vertically on its own;
    /// the road scrolls instead.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, regen: f32, trail_chance: f64, cap: usize) {
        self.apply_nitro_regen(regen);
        update_particles(&mut self.trail);
        if trail_chance > 0.0 && cap > 0 {
            self.spawn_trail_particle(rng, trail_chance, cap);
        }
    }

    /// Speed relative to cruise, for the HUD speed bar
    pub fn speed_ratio(&self) -> f32 {
        if self.max_speed > 0.0 {
            self.body.speed / self.max_speed
        } else {
            0.0
        }
    }
}
