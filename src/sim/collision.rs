//! Content-box collision detection
//!
//! Cars collide when the tight boxes around their opaque pixels overlap.
//! Drift rotation is cosmetic; the box never rotates.

use glam::Vec2;

use super::vehicle::Body;

/// World-space axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: shared edges don't count, empty boxes never hit
    pub fn intersects(&self, other: &Hitbox) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0
        {
            return false;
        }
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Whether two vehicles' content boxes overlap
pub fn intersects(a: &Body, b: &Body) -> bool {
    a.hitbox().intersects(&b.hitbox())
}
