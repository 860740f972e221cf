//! Held-key input

use crate::sim::TickInput;

/// Keys the frontend reports as held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    /// Space: nitro while driving, restart after a crash
    pub boost: bool,
}

/// Edge detection on top of held keys
#[derive(Debug, Clone, Default)]
pub struct Controls {
    held: KeyState,
    prev_boost: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's key state
    pub fn update(&mut self, keys: KeyState) {
        self.prev_boost = self.held.boost;
        self.held = keys;
    }

    /// Held keys as simulation input
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            steer_left: self.held.left,
            steer_right: self.held.right,
            boost: self.held.boost,
        }
    }

    /// Boost went down this frame (used as the restart key)
    pub fn boost_pressed(&self) -> bool {
        self.held.boost && !self.prev_boost
    }
}
