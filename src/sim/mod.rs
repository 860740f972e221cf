//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Wall-clock time only arrives as the `dt` passed to `tick`
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod particle;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use collision::{Hitbox, intersects};
pub use difficulty::DifficultyScaler;
pub use particle::Particle;
pub use snapshot::{EnemyView, FrameSnapshot, ParticleView, PlayerView};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::{TickInput, tick};
pub use vehicle::{Body, Enemy, Player, Steer};
