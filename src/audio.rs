//! Procedural sound cues
//!
//! Every effect is a short list of oscillator tones, so no audio files ship
//! with the games. Playback goes through the Web Audio API on wasm32; the
//! cue tables and event mapping are plain data and available everywhere.

use crate::game::{Cue, LifecycleEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Round started
    Start,
    /// Orb, coin, food picked up
    Collect,
    PowerUp,
    /// Collision or damage
    Hit,
    /// Score crossed a milestone
    Milestone,
    GameOver,
    /// Round ended with a new best
    HighScore,
    /// UI feedback (pause, small moves)
    Click,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator voice with an exponential decay envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub freq: f32,
    /// Frequency glided to over the tone (None = steady)
    pub end_freq: Option<f32>,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Seconds after the effect starts
    pub delay: f64,
    pub duration: f64,
}

const fn tone(wave: Wave, freq: f32, gain: f32, delay: f64, duration: f64) -> Tone {
    Tone {
        wave,
        freq,
        end_freq: None,
        gain,
        delay,
        duration,
    }
}

const fn glide(wave: Wave, freq: f32, end_freq: f32, gain: f32, duration: f64) -> Tone {
    Tone {
        wave,
        freq,
        end_freq: Some(end_freq),
        gain,
        delay: 0.0,
        duration,
    }
}

use Wave::*;

const START: &[Tone] = &[glide(Triangle, 220.0, 660.0, 0.35, 0.18)];
const COLLECT: &[Tone] = &[
    tone(Sine, 880.0, 0.25, 0.0, 0.06),
    tone(Sine, 1320.0, 0.25, 0.05, 0.08),
];
const POWER_UP: &[Tone] = &[
    glide(Square, 330.0, 990.0, 0.15, 0.25),
    glide(Sine, 660.0, 1980.0, 0.2, 0.25),
];
const HIT: &[Tone] = &[
    glide(Sawtooth, 180.0, 40.0, 0.4, 0.2),
    glide(Sine, 90.0, 30.0, 0.5, 0.25),
];
const MILESTONE: &[Tone] = &[
    tone(Triangle, 523.25, 0.3, 0.0, 0.1),
    tone(Triangle, 659.25, 0.3, 0.1, 0.1),
    tone(Triangle, 783.99, 0.3, 0.2, 0.18),
];
const GAME_OVER: &[Tone] = &[
    tone(Triangle, 392.0, 0.35, 0.0, 0.2),
    tone(Triangle, 311.13, 0.35, 0.2, 0.2),
    glide(Sine, 261.63, 130.81, 0.4, 0.6),
];
const HIGH_SCORE: &[Tone] = &[
    tone(Square, 523.25, 0.2, 0.0, 0.12),
    tone(Square, 659.25, 0.2, 0.12, 0.12),
    tone(Square, 783.99, 0.2, 0.24, 0.12),
    tone(Sine, 1046.5, 0.3, 0.36, 0.4),
];
const CLICK: &[Tone] = &[tone(Sine, 1000.0, 0.15, 0.0, 0.03)];

impl SoundEffect {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Start => START,
            SoundEffect::Collect => COLLECT,
            SoundEffect::PowerUp => POWER_UP,
            SoundEffect::Hit => HIT,
            SoundEffect::Milestone => MILESTONE,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::HighScore => HIGH_SCORE,
            SoundEffect::Click => CLICK,
        }
    }

    /// Seconds until the last voice stops
    pub fn length(&self) -> f64 {
        self.tones()
            .iter()
            .map(|t| t.delay + t.duration)
            .fold(0.0, f64::max)
    }

    /// Sound to play for a host event, if any
    pub fn for_event(event: &LifecycleEvent) -> Option<SoundEffect> {
        match event {
            LifecycleEvent::Started => Some(SoundEffect::Start),
            LifecycleEvent::Paused | LifecycleEvent::Resumed => Some(SoundEffect::Click),
            LifecycleEvent::Milestone { .. } => Some(SoundEffect::Milestone),
            LifecycleEvent::Cue(cue) => Some(match cue {
                Cue::Collect => SoundEffect::Collect,
                Cue::PowerUp => SoundEffect::PowerUp,
                Cue::PowerDown | Cue::Move => SoundEffect::Click,
                Cue::Hit => SoundEffect::Hit,
            }),
            LifecycleEvent::GameOver { rank: Some(1), .. } => Some(SoundEffect::HighScore),
            LifecycleEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            // The fanfare plays once, at game over
            LifecycleEvent::NewBest { .. }
            | LifecycleEvent::ScoreChanged { .. }
            | LifecycleEvent::Mounted
            | LifecycleEvent::Unmounted => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Wave};
    use crate::settings::Settings;

    /// Web Audio output for sound effects
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context or without audio hardware
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume the context (browsers require a user gesture first)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let t = ctx.current_time();
            for tone in effect.tones() {
                self.play_tone(ctx, tone, t);
            }
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, now: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.wave) else {
                return;
            };
            let start = now + tone.delay;
            let end = start + tone.duration;

            gain.gain().set_value_at_time(0.0, now).ok();
            gain.gain().set_value_at_time(tone.gain * self.volume, start).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if let Some(to) = tone.end_freq {
                osc.frequency().set_value_at_time(tone.freq, start).ok();
                osc.frequency().exponential_ramp_to_value_at_time(to, end).ok();
            }

            osc.start_with_when(start).ok();
            osc.stop_with_when(end + 0.02).ok();
        }

        /// Oscillator routed through a gain node to the speakers
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            wave: Wave,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_effect_has_audible_tones() {
        let all = [
            SoundEffect::Start,
            SoundEffect::Collect,
            SoundEffect::PowerUp,
            SoundEffect::Hit,
            SoundEffect::Milestone,
            SoundEffect::GameOver,
            SoundEffect::HighScore,
            SoundEffect::Click,
        ];
        for effect in all {
            let tones = effect.tones();
            assert!(!tones.is_empty(), "{effect:?}");
            assert!(tones.iter().all(|t| t.freq > 0.0 && t.gain > 0.0 && t.duration > 0.0));
            // Exponential ramps cannot reach zero
            assert!(tones.iter().all(|t| t.end_freq.is_none_or(|f| f > 0.0)));
            assert!(effect.length() < 1.0, "{effect:?} is too long for a cue");
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&LifecycleEvent::Cue(Cue::Collect)),
            Some(SoundEffect::Collect)
        );
        assert_eq!(
            SoundEffect::for_event(&LifecycleEvent::GameOver {
                score: 10,
                best: 10,
                rank: Some(1)
            }),
            Some(SoundEffect::HighScore)
        );
        assert_eq!(
            SoundEffect::for_event(&LifecycleEvent::GameOver {
                score: 1,
                best: 10,
                rank: None
            }),
            Some(SoundEffect::GameOver)
        );
        assert_eq!(
            SoundEffect::for_event(&LifecycleEvent::ScoreChanged { score: 3 }),
            None
        );
    }

    #[test]
    fn test_length_covers_delayed_voices() {
        assert!((SoundEffect::HighScore.length() - 0.76).abs() < 1e-9);
    }
}
