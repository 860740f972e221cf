//! Frame driver
//!
//! Owns the session and its collaborators and runs the fixed-step loop:
//! keys in, ticks, events out to audio, snapshot for the renderer.
//!
//! Ticks run at a fixed count per frame, but the real frame time is handed
//! to them so the difficulty clock keeps wall-clock pace when substeps are
//! capped or a frame runs no tick at all.

use crate::audio::{AudioRouter, AudioSink};
use crate::platform::{Controls, FixedStep, KeyState};
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GameEvent, GameSession, tick};

/// A running game with its audio sink injected
pub struct Game<S: AudioSink> {
    pub session: GameSession,
    audio: AudioRouter<S>,
    controls: Controls,
    step: FixedStep,
    /// Real seconds not yet handed to a tick
    unclocked: f32,
}

impl<S: AudioSink> Game<S> {
    pub fn new(mut session: GameSession, sink: S, settings: Settings) -> Self {
        session.apply_settings(&settings);
        let mut game = Self {
            session,
            audio: AudioRouter::new(sink, &settings),
            controls: Controls::new(),
            step: FixedStep::new(),
            unclocked: 0.0,
        };
        game.flush_events();
        game
    }

    /// Advance by one rendered frame lasting `frame_dt` seconds.
    /// Returns the number of simulation ticks run.
    pub fn frame(&mut self, frame_dt: f32, keys: KeyState) -> u32 {
        self.controls.update(keys);

        if self.session.is_game_over() {
            if self.controls.boost_pressed() {
                self.restart();
            }
            return 0;
        }

        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.unclocked += frame_dt;
        }
        let steps = self.step.steps(frame_dt);
        if steps == 0 {
            return 0;
        }

        // Spread the real elapsed time over this frame's ticks
        let dt = self.unclocked / steps as f32;
        self.unclocked = 0.0;
        let input = self.controls.tick_input();
        for _ in 0..steps {
            tick(&mut self.session, &input, dt);
            if self.session.is_game_over() {
                break;
            }
        }
        self.flush_events();
        steps
    }

    /// Throw the old run away and start fresh
    pub fn restart(&mut self) {
        self.session.reset();
        self.step.reset();
        self.unclocked = 0.0;
        self.flush_events();
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.session.snapshot()
    }

    pub fn audio(&self) -> &AudioRouter<S> {
        &self.audio
    }

    /// Stop all sounds (call before dropping)
    pub fn shutdown(&mut self) {
        self.audio.stop_all();
    }

    fn flush_events(&mut self) {
        let events = self.session.drain_events();
        for event in &events {
            if let GameEvent::Crash { final_score } = event {
                log::info!("Game over - press space to restart (score {})", final_score);
            }
        }
        self.audio.handle_all(&events);
    }
}
