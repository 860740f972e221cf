//! Read-only view of a session for the renderer and HUD

use glam::Vec2;
use serde::Serialize;

use super::particle::Particle;
use super::state::GameSession;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub drifting: bool,
    pub drift_angle: f32,
    pub nitro: f32,
    /// Current speed over cruise speed (HUD speed bar)
    pub speed_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub variant: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: [u8; 3],
    /// Fade, 1.0 = opaque
    pub life_ratio: f32,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            color: p.color,
            life_ratio: p.life_ratio(),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    /// Track width and height
    pub track: Vec2,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    /// Trail first, then nitro burst
    pub particles: Vec<ParticleView>,
    pub lane_markings: Vec<Vec2>,
    pub score: u32,
    pub difficulty_multiplier: f32,
    pub distance: f32,
    pub game_over: bool,
}

impl GameSession {
    pub fn snapshot(&self) -> FrameSnapshot {
        let player = &self.player;
        FrameSnapshot {
            track: Vec2::new(self.tuning.track_width, self.tuning.track_height),
            player: PlayerView {
                pos: player.body.pos,
                size: player.body.size,
                drifting: player.drifting,
                drift_angle: player.drift_angle,
                nitro: player.nitro,
                speed_ratio: player.speed_ratio(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.body.pos,
                    size: e.body.size,
                    variant: e.variant,
                })
                .collect(),
            particles: player
                .trail
                .iter()
                .chain(self.particles.iter())
                .map(ParticleView::from)
                .collect(),
            lane_markings: self.lane_markings.clone(),
            score: self.score,
            difficulty_multiplier: self.difficulty_multiplier(),
            distance: self.distance,
            game_over: self.is_game_over(),
        }
    }
}
