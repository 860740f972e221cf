//! Decorative particles (exhaust trail, nitro burst)
//!
//! Purely cosmetic: particles never collide with anything.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_FULL_LIFE, PARTICLE_SHRINK};

/// Exhaust trail color
pub const TRAIL_COLOR: [u8; 3] = [100, 100, 100];
/// Nitro burst color
pub const NITRO_COLOR: [u8; 3] = [255, 165, 0];

/// A falling, shrinking particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub color: [u8; 3],
    pub size: f32,
    /// Pixels per tick, straight down
    pub speed: f32,
    /// Ticks remaining
    pub life: f32,
}

impl Particle {
    /// Spawn at `pos` with randomized size, fall speed and lifetime
    pub fn spawn<R: Rng>(pos: Vec2, color: [u8; 3], rng: &mut R) -> Self {
        Self {
            pos,
            color,
            size: f32::from(rng.random_range(2u8..=5)),
            speed: f32::from(rng.random_range(2u8..=6)),
            life: f32::from(rng.random_range(20u8..=40)),
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        self.life -= 1.0;
        self.size = (self.size - PARTICLE_SHRINK).max(0.0);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Opacity for rendering, 0-1
    pub fn life_ratio(&self) -> f32 {
        (self.life / PARTICLE_FULL_LIFE).clamp(0.0, 1.0)
    }
}

/// Advance every particle and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.update();
    }
    particles.retain(Particle::is_alive);
}

/// Push unless the collection is already at `cap`
pub fn push_capped(particles: &mut Vec<Particle>, particle: Particle, cap: usize) {
    if particles.len() < cap {
        particles.push(particle);
    }
}
