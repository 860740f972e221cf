//! Wall-clock difficulty ramp
//!
//! Anchored to real seconds, not ticks, so pacing stays the same at any frame rate.

use serde::{Deserialize, Serialize};

/// Steps the traffic speed multiplier on a fixed cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyScaler {
    interval: f32,
    step: f32,
    /// Seconds since the last step
    elapsed: f32,
    /// Steps taken this session
    level: u32,
}

impl DifficultyScaler {
    pub fn new(interval: f32, step: f32) -> Self {
        Self {
            interval,
            step,
            elapsed: 0.0,
            level: 0,
        }
    }

    /// Current speed multiplier (1.0 at session start)
    pub fn multiplier(&self) -> f32 {
        1.0 + self.level as f32 * self.step
    }

    /// Add `dt` seconds. Returns true when the multiplier stepped up.
    ///
    /// At most one step per call; the clock restarts from zero after a step.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            self.level += 1;
            true
        } else {
            false
        }
    }
}
