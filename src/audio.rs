//! Audio cue routing
//!
//! The simulation only emits `GameEvent`s. This module turns them into
//! play/stop commands on whatever sound backend the frontend injects.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sounds the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Looping engine hum
    Engine,
    /// Car hits traffic
    Crash,
    /// Tyre squeal while steering
    Drift,
    /// Nitro kicks in
    Nitro,
}

impl SoundCue {
    /// Suggested asset name for the frontend
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundCue::Engine => "modern_engine.wav",
            SoundCue::Crash => "crash.wav",
            SoundCue::Drift => "drift.wav",
            SoundCue::Nitro => "nitro.wav",
        }
    }
}

/// Sound backend owned by the frontend
pub trait AudioSink {
    /// Start a cue; `looping` keeps it going until stopped
    fn play(&mut self, cue: SoundCue, volume: f32, looping: bool);
    fn stop(&mut self, cue: SoundCue);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    /// Cues played so far
    pub played: Vec<SoundCue>,
}

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32, looping: bool) {
        log::debug!(
            "play {} (vol {:.2}{})",
            cue.asset_name(),
            volume,
            if looping { ", loop" } else { "" }
        );
        self.played.push(cue);
    }

    fn stop(&mut self, cue: SoundCue) {
        log::debug!("stop {}", cue.asset_name());
    }
}

/// Maps simulation events onto an injected sink
pub struct AudioRouter<S: AudioSink> {
    sink: S,
    effect_volume: f32,
    engine_volume: f32,
}

impl<S: AudioSink> AudioRouter<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            effect_volume: settings.effect_volume(),
            engine_volume: settings.engine_loop_volume(),
        }
    }

    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::SessionStarted => {
                self.sink.play(SoundCue::Engine, self.engine_volume, true);
            }
            GameEvent::Crash { .. } => {
                self.sink.stop(SoundCue::Drift);
                self.sink.play(SoundCue::Crash, self.effect_volume, false);
                self.sink.stop(SoundCue::Engine);
            }
            GameEvent::BoostEngaged => {
                self.sink.play(SoundCue::Nitro, self.effect_volume, false);
            }
            GameEvent::Drifting { .. } => {
                self.sink.play(SoundCue::Drift, self.effect_volume, false);
            }
            GameEvent::DriftEnded => self.sink.stop(SoundCue::Drift),
            GameEvent::EnemyPassed { .. } | GameEvent::DifficultyIncreased { .. } => {}
        }
    }

    pub fn handle_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Shut everything up (shutdown)
    pub fn stop_all(&mut self) {
        for cue in [SoundCue::Engine, SoundCue::Drift, SoundCue::Nitro, SoundCue::Crash] {
            self.sink.stop(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        log: Vec<(bool, SoundCue, bool)>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, cue: SoundCue, _volume: f32, looping: bool) {
            self.log.push((true, cue, looping));
        }

        fn stop(&mut self, cue: SoundCue) {
            self.log.push((false, cue, false));
        }
    }

    #[test]
    fn test_event_routing() {
        let mut router = AudioRouter::new(RecordingSink::default(), &Settings::default());
        router.handle_all(&[
            GameEvent::SessionStarted,
            GameEvent::Drifting { angle: 15.0 },
            GameEvent::DriftEnded,
            GameEvent::EnemyPassed { score: 1 },
            GameEvent::BoostEngaged,
            GameEvent::Crash { final_score: 1 },
        ]);
        assert_eq!(
            router.sink().log,
            vec![
                (true, SoundCue::Engine, true),
                (true, SoundCue::Drift, false),
                (false, SoundCue::Drift, false),
                (true, SoundCue::Nitro, false),
                (false, SoundCue::Drift, false),
                (true, SoundCue::Crash, false),
                (false, SoundCue::Engine, false),
            ]
        );
    }

    #[test]
    fn test_muted_volume() {
        let mut settings = Settings::default();
        settings.muted = true;
        let router = AudioRouter::new(LogSink::default(), &settings);
        assert_eq!(router.effect_volume, 0.0);
        assert_eq!(router.engine_volume, 0.0);
    }
}
