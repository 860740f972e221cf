//! Traffic spawning
//!
//! A Bernoulli trial every tick: no timers, just a chance per tick.

use glam::Vec2;
use rand::Rng;

use super::vehicle::{Body, Enemy};
use crate::consts::ENEMY_VARIANTS;
use crate::sprites::SpriteTable;
use crate::tuning::{SpawnPolicy, Tuning};

#[derive(Debug, Clone)]
pub struct Spawner {
    pub policy: SpawnPolicy,
    track_width: f32,
    size: Vec2,
    min_speed: f32,
    max_speed: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            policy: tuning.spawn,
            track_width: tuning.track_width,
            size: Vec2::new(tuning.enemy_width, tuning.enemy_height),
            min_speed: tuning.enemy_min_speed,
            max_speed: tuning.enemy_max_speed,
        }
    }

    /// Roll for a spawn this tick
    pub fn should_spawn<R: Rng>(&self, rng: &mut R, dt: f32) -> bool {
        let chance = self.policy.chance(dt).clamp(0.0, 1.0);
        chance > 0.0 && rng.random_bool(chance)
    }

    /// Build a new car just above the top of the track, already scaled to the
    /// current difficulty
    pub fn spawn<R: Rng>(
        &self,
        rng: &mut R,
        id: u32,
        multiplier: f32,
        sprites: &SpriteTable,
    ) -> Enemy {
        let max_x = (self.track_width - self.size.x).max(0.0);
        let x = if max_x > 0.0 {
            rng.random_range(0.0..=max_x)
        } else {
            0.0
        };
        let variant = rng.random_range(1..=ENEMY_VARIANTS);
        let base_speed = rng.random_range(self.min_speed..self.max_speed);

        let mut enemy = Enemy {
            id,
            body: Body::new(
                Vec2::new(x, -self.size.y),
                self.size,
                sprites.enemy(variant),
                base_speed,
            ),
            variant,
        };
        enemy.rescale(multiplier);
        log::debug!(
            "Spawned enemy {} (variant {}) at x={:.0}, speed {:.2}",
            id,
            variant,
            x,
            enemy.body.speed
        );
        enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::SolidCatalog;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_placement() {
        let tuning = Tuning::default();
        let sprites = SpriteTable::resolve(&SolidCatalog, &tuning);
        let spawner = Spawner::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(42);

        for id in 0..500 {
            let e = spawner.spawn(&mut rng, id, 1.4, &sprites);
            assert!(e.body.pos.x >= 0.0);
            assert!(e.body.pos.x + e.body.size.x <= tuning.track_width);
            // fully above the visible area
            assert!(e.body.pos.y + e.body.size.y <= 0.0);
            assert!(e.body.base_speed >= 3.0 && e.body.base_speed < 7.0);
            assert!((e.body.speed - e.body.base_speed * 1.4).abs() < 1e-5);
            assert!((1..=ENEMY_VARIANTS).contains(&e.variant));
        }
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let spawner = Spawner::new(&Tuning::default().without_traffic());
        let mut rng = Pcg32::seed_from_u64(1);
        assert!((0..10_000).all(|_| !spawner.should_spawn(&mut rng, 1.0 / 60.0)));
    }

    #[test]
    fn test_spawn_rate_roughly_matches() {
        let spawner = Spawner::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(9);
        let spawned = (0..60_000)
            .filter(|_| spawner.should_spawn(&mut rng, 1.0 / 60.0))
            .count();
        // 2% of 60k = 1200
        assert!((1000..1400).contains(&spawned), "spawned {spawned}");
    }
}
