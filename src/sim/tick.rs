//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame.

use glam::Vec2;
use rand::Rng;

use super::collision::intersects;
use super::particle::{NITRO_COLOR, Particle, push_capped, update_particles};
use super::state::{GameEvent, GamePhase, GameSession};

/// Keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub boost: bool,
}

/// Advance the session by one tick. `dt` is real (monotonic) seconds since
/// the previous tick and only feeds the difficulty clock and per-second spawning.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if session.phase == GamePhase::GameOver {
        return;
    }

    session.time_ticks += 1;

    // Difficulty ramp; applies to cars already on the road too
    if session.difficulty.advance(dt) {
        let multiplier = session.difficulty.multiplier();
        for enemy in &mut session.enemies {
            enemy.rescale(multiplier);
        }
        log::info!("Difficulty up: {:.1}x", multiplier);
        session
            .events
            .push(GameEvent::DifficultyIncreased { multiplier });
    }

    apply_input(session, input);

    let cap = session.max_particles;
    let trail_chance = if session.trails {
        session.tuning.trail_chance
    } else {
        0.0
    };
    session
        .player
        .advance(&mut session.rng, session.tuning.nitro_regen, trail_chance, cap);

    // Scroll the road under the player
    let speed = session.player.body.speed;
    session.distance += speed;
    let track_height = session.tuning.track_height;
    for marking in &mut session.lane_markings {
        marking.y = (marking.y + speed).rem_euclid(track_height);
    }

    if session.spawner.should_spawn(&mut session.rng, dt) {
        session.spawn_enemy();
    }

    resolve_traffic(session);

    update_particles(&mut session.particles);
}

/// Steering, drift and nitro for this tick
fn apply_input(session: &mut GameSession, input: &TickInput) {
    let tuning = &session.tuning;
    let player = &mut session.player;
    let was_drifting = player.drifting;
    let was_boosting = player.boosting;

    // Steering uses last tick's speed, before throttle updates it
    let steer = player.resolve_steer(input.steer_left, input.steer_right, tuning.track_width);
    player.steer(steer, tuning.track_width, tuning.drift_angle);
    if player.drifting {
        session.events.push(GameEvent::Drifting {
            angle: player.drift_angle,
        });
    } else if was_drifting {
        session.events.push(GameEvent::DriftEnded);
    }

    if player.throttle(input.boost, tuning.boost_factor, tuning.nitro_cost) {
        if !was_boosting {
            session.events.push(GameEvent::BoostEngaged);
        }
        let width = player.body.size.x;
        let bottom = player.body.pos.y + player.body.size.y;
        for _ in 0..tuning.boost_burst_count {
            let x = player.body.pos.x + session.rng.random_range(0.0..=width);
            let particle = Particle::spawn(Vec2::new(x, bottom), NITRO_COLOR, &mut session.rng);
            push_capped(&mut session.particles, particle, session.max_particles);
        }
    }
}

/// Move traffic, score cars that got past, and check for a crash.
/// Survivors are compacted in place; processing stops at the first crash.
fn resolve_traffic(session: &mut GameSession) {
    let track_height = session.tuning.track_height;
    let player = &session.player.body;
    let mut passed = 0u32;
    let mut crashed = false;

    session.enemies.retain_mut(|enemy| {
        if crashed {
            return true;
        }
        enemy.advance();
        if enemy.body.pos.y > track_height {
            passed += 1;
            return false;
        }
        if intersects(player, &enemy.body) {
            crashed = true;
        }
        true
    });

    for _ in 0..passed {
        session.score += 1;
        session.events.push(GameEvent::EnemyPassed {
            score: session.score,
        });
    }

    if crashed {
        session.phase = GamePhase::GameOver;
        log::info!("Crash! Final score {}", session.score);
        session.events.push(GameEvent::Crash {
            final_score: session.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sprites::{SolidCatalog, SpriteTable};
    use crate::tuning::{SpawnPolicy, Tuning};
    use proptest::prelude::*;

    fn quiet_session() -> GameSession {
        let tuning = Tuning::default().without_traffic();
        let sprites = SpriteTable::resolve(&SolidCatalog, &tuning);
        let mut s = GameSession::with_config(7, tuning, sprites, &Settings::default());
        s.drain_events();
        s
    }

    const IDLE: TickInput = TickInput {
        steer_left: false,
        steer_right: false,
        boost: false,
    };

    #[test]
    fn test_idle_without_traffic() {
        let mut s = quiet_session();
        let x = s.player.body.pos.x;
        for _ in 0..600 {
            tick(&mut s, &IDLE, SIM_DT);
        }
        assert_eq!(s.score, 0);
        assert!(!s.is_game_over());
        assert!(s.enemies.is_empty());
        assert_eq!(s.player.body.pos.x, x);
        assert_eq!(s.time_ticks, 600);
        assert!((s.distance - 600.0 * PLAYER_MAX_SPEED).abs() < 1.0);
    }

    #[test]
    fn test_overlapping_enemy_ends_game() {
        let mut s = quiet_session();
        s.score = 4;
        let pos = s.player.body.pos;
        s.insert_enemy(pos, 3.0, 1);

        tick(&mut s, &IDLE, SIM_DT);
        assert!(s.is_game_over());
        assert_eq!(s.score, 4);
        assert!(s.drain_events().contains(&GameEvent::Crash { final_score: 4 }));
        // crashed car stays on screen
        assert_eq!(s.enemies.len(), 1);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut s = quiet_session();
        let pos = s.player.body.pos;
        s.insert_enemy(pos, 3.0, 1);
        s.insert_enemy(Vec2::new(0.0, 700.0), 7.0, 2);
        tick(&mut s, &IDLE, SIM_DT);
        assert!(s.is_game_over());
        s.drain_events();

        let score = s.score;
        let enemies: Vec<_> = s.enemies.iter().map(|e| (e.id, e.body.pos)).collect();
        let particles = s.particles.len();
        let multiplier = s.difficulty_multiplier();
        let player_x = s.player.body.pos.x;

        let input = TickInput {
            steer_left: true,
            steer_right: false,
            boost: true,
        };
        for _ in 0..100 {
            tick(&mut s, &input, 10.0);
        }
        assert_eq!(s.score, score);
        assert_eq!(
            s.enemies.iter().map(|e| (e.id, e.body.pos)).collect::<Vec<_>>(),
            enemies
        );
        assert_eq!(s.particles.len(), particles);
        assert_eq!(s.difficulty_multiplier(), multiplier);
        assert_eq!(s.player.body.pos.x, player_x);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_crash_freezes_later_traffic() {
        let mut s = quiet_session();
        s.score = 2;
        let pos = s.player.body.pos;
        s.insert_enemy(pos, 3.0, 1);
        // would leave the track this tick if it were processed
        let exiting = s.insert_enemy(Vec2::new(0.0, TRACK_HEIGHT - 1.0), 4.0, 2);

        tick(&mut s, &IDLE, SIM_DT);
        assert!(s.is_game_over());
        assert_eq!(s.score, 2);
        let late = s.enemies.iter().find(|e| e.id == exiting).unwrap();
        assert_eq!(late.body.pos.y, TRACK_HEIGHT - 1.0);
        assert_eq!(s.enemies.len(), 2);
        assert!(!s
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyPassed { .. })));
    }

    #[test]
    fn test_per_second_spawning_follows_dt() {
        fn spawned(dt: f32) -> usize {
            let mut tuning = Tuning::default();
            tuning.spawn = SpawnPolicy::PerSecond { rate: 1.2 };
            let sprites = SpriteTable::resolve(&SolidCatalog, &tuning);
            let mut s = GameSession::with_config(21, tuning, sprites, &Settings::default());
            // short enough that nothing reaches the player or the bottom
            for _ in 0..40 {
                tick(&mut s, &IDLE, dt);
            }
            assert!(!s.is_game_over());
            s.enemies.len()
        }

        assert_eq!(spawned(0.0), 0);
        let slow_frames = spawned(1.0);
        assert!(slow_frames > 15, "got {slow_frames}");
        assert!(spawned(SIM_DT) < slow_frames);
    }

    #[test]
    fn test_enemy_past_bottom_scores_once() {
        let mut s = quiet_session();
        s.insert_enemy(Vec2::new(0.0, TRACK_HEIGHT - 1.0), 4.0, 1);
        s.insert_enemy(Vec2::new(0.0, 0.0), 3.0, 1);

        tick(&mut s, &IDLE, SIM_DT);
        assert_eq!(s.score, 1);
        assert_eq!(s.enemies.len(), 1);
        assert_eq!(s.drain_events(), vec![GameEvent::EnemyPassed { score: 1 }]);

        tick(&mut s, &IDLE, SIM_DT);
        assert_eq!(s.score, 1);
    }

    #[test]
    fn test_difficulty_rescales_live_enemies() {
        let mut s = quiet_session();
        s.insert_enemy(Vec2::new(0.0, -160.0), 3.0, 1);
        s.insert_enemy(Vec2::new(800.0, -160.0), 6.5, 2);

        tick(&mut s, &IDLE, 4.0);
        assert_eq!(s.difficulty_multiplier(), 1.0);
        tick(&mut s, &IDLE, 1.0);
        let m = s.difficulty_multiplier();
        assert!((m - 1.2).abs() < 1e-6);
        for enemy in &s.enemies {
            assert!((enemy.body.speed - enemy.body.base_speed * m).abs() < 1e-5);
        }
        assert!(s
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::DifficultyIncreased { .. })));
    }

    #[test]
    fn test_boost_runs_dry() {
        let mut s = quiet_session();
        s.player.nitro = 5.0;
        let boost = TickInput {
            boost: true,
            ..Default::default()
        };

        for expected in [4.0, 3.0, 2.0, 1.0, 0.0] {
            tick(&mut s, &boost, SIM_DT);
            assert_eq!(s.player.nitro, expected);
            assert_eq!(s.player.body.speed, PLAYER_MAX_SPEED * BOOST_FACTOR);
        }

        tick(&mut s, &boost, SIM_DT);
        assert_eq!(s.player.body.speed, PLAYER_MAX_SPEED);
        assert!(!s.player.boosting);
        assert!((s.player.nitro - NITRO_REGEN).abs() < 1e-6);

        let events = s.drain_events();
        let engaged = events.iter().filter(|e| **e == GameEvent::BoostEngaged).count();
        assert_eq!(engaged, 1);
    }

    #[test]
    fn test_boost_spawns_burst() {
        let mut s = quiet_session();
        let boost = TickInput {
            boost: true,
            ..Default::default()
        };
        tick(&mut s, &boost, SIM_DT);
        assert_eq!(s.particles.len(), BOOST_BURST_COUNT as usize);
        let left = s.player.body.pos.x;
        for p in &s.particles {
            assert!(p.pos.x >= left && p.pos.x <= left + PLAYER_WIDTH);
            assert_eq!(p.color, NITRO_COLOR);
        }
    }

    #[test]
    fn test_drift_events() {
        let mut s = quiet_session();
        let left = TickInput {
            steer_left: true,
            ..Default::default()
        };
        tick(&mut s, &left, SIM_DT);
        tick(&mut s, &left, SIM_DT);
        tick(&mut s, &IDLE, SIM_DT);
        tick(&mut s, &IDLE, SIM_DT);
        assert_eq!(
            s.drain_events(),
            vec![
                GameEvent::Drifting { angle: DRIFT_ANGLE },
                GameEvent::Drifting { angle: DRIFT_ANGLE },
                GameEvent::DriftEnded,
            ]
        );
        // first tick steers with the starting speed, the second with cruise speed
        assert_eq!(
            s.player.body.pos.x,
            512.0 - PLAYER_BASE_SPEED - PLAYER_MAX_SPEED
        );
    }

    #[test]
    fn test_lane_markings_wrap() {
        let mut s = quiet_session();
        for _ in 0..100 {
            tick(&mut s, &IDLE, SIM_DT);
        }
        for m in &s.lane_markings {
            assert!(m.y >= 0.0 && m.y < TRACK_HEIGHT);
            assert_eq!(m.y, (100.0 * PLAYER_MAX_SPEED) % TRACK_HEIGHT);
        }
    }

    #[test]
    fn test_traffic_spawns() {
        let mut s = GameSession::new(3);
        for _ in 0..600 {
            tick(&mut s, &IDLE, SIM_DT);
            if s.is_game_over() {
                break;
            }
        }
        assert!(s.time_ticks > 0);
        assert!(s.next_entity_id() > 1, "some traffic should have spawned");
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(99999);
        let mut b = GameSession::new(99999);
        let inputs = [
            TickInput {
                steer_left: true,
                ..Default::default()
            },
            TickInput {
                boost: true,
                ..Default::default()
            },
            TickInput {
                steer_right: true,
                boost: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..2000 {
            let input = &inputs[(i / 37) % inputs.len()];
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.player.body.pos, b.player.body.pos);
        assert_eq!(a.drain_events(), b.drain_events());
    }

    proptest! {
        #[test]
        fn prop_nitro_stays_in_range(
            start in 0.0f32..=100.0,
            presses in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let mut s = quiet_session();
            s.player.nitro = start;
            for boost in presses {
                let before = s.player.nitro;
                let input = TickInput { boost, ..Default::default() };
                tick(&mut s, &input, SIM_DT);
                let after = s.player.nitro;
                prop_assert!((0.0..=NITRO_MAX).contains(&after));
                if boost && before > 0.0 {
                    prop_assert!((after - (before - NITRO_COST).max(0.0)).abs() < 1e-4);
                } else {
                    prop_assert!((after - (before + NITRO_REGEN).min(NITRO_MAX)).abs() < 1e-4);
                }
            }
        }

        #[test]
        fn prop_particles_respect_cap(seed in any::<u64>(), cap in 0usize..20) {
            let mut s = GameSession::new(seed);
            s.max_particles = cap;
            let input = TickInput { boost: true, ..Default::default() };
            for _ in 0..120 {
                tick(&mut s, &input, SIM_DT);
                prop_assert!(s.particles.len() <= cap);
                prop_assert!(s.player.trail.len() <= cap);
            }
        }
    }
}
