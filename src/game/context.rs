//! Per-game services handed to every `Game` hook

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::InputState;
use super::score::Score;
use super::Cue;
use crate::components::{BurstStyle, ParticleSystem};
use crate::consts::SHAKE_DECAY;
use crate::geometry::Rect;
use crate::theme::Theme;

/// Everything a game may touch besides its own state
pub struct GameContext {
    pub score: Score,
    pub particles: ParticleSystem,
    pub input: InputState,
    /// Seeded per round so runs are reproducible
    pub rng: Pcg32,
    /// Play-field size in CSS pixels
    pub size: Vec2,
    /// Seconds of play this round (excludes pauses)
    pub elapsed: f32,
    /// Current theme (kept in sync by the host)
    pub theme: Theme,
    /// 0..1, decays each step
    screen_shake: f32,
    shake_enabled: bool,
    cues: Vec<Cue>,
    game_over_requested: bool,
    /// Game-defined progress recorded with high scores (level, wave, length)
    pub level: u32,
}

impl GameContext {
    pub fn new(seed: u64, size: Vec2, theme: Theme, particle_cap: usize) -> Self {
        Self {
            score: Score::default(),
            particles: ParticleSystem::new(particle_cap),
            input: InputState::new(),
            rng: Pcg32::seed_from_u64(seed),
            size,
            elapsed: 0.0,
            theme,
            screen_shake: 0.0,
            shake_enabled: true,
            cues: Vec::new(),
            game_over_requested: false,
            level: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.x, self.size.y)
    }

    /// Ask the host to end the round after this step
    pub fn end_game(&mut self) {
        self.game_over_requested = true;
    }

    pub(crate) fn take_game_over_request(&mut self) -> bool {
        std::mem::take(&mut self.game_over_requested)
    }

    /// Queue a sound/feedback cue for the host to forward
    pub fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub(crate) fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Kick the screen (intensity 0..1, keeps the stronger of old and new)
    pub fn shake(&mut self, intensity: f32) {
        if self.shake_enabled {
            self.screen_shake = self.screen_shake.max(intensity.clamp(0.0, 1.0));
        }
    }

    pub fn screen_shake(&self) -> f32 {
        self.screen_shake
    }

    pub(crate) fn set_shake_enabled(&mut self, enabled: bool) {
        self.shake_enabled = enabled;
        if !enabled {
            self.screen_shake = 0.0;
        }
    }

    pub(crate) fn decay_shake(&mut self) {
        self.screen_shake *= SHAKE_DECAY;
        if self.screen_shake < 0.01 {
            self.screen_shake = 0.0;
        }
    }

    /// Particle burst in the current theme's colors
    pub fn burst(&mut self, pos: Vec2, count: usize) -> usize {
        let colors = self.theme.effects.particle_colors.clone();
        let colors = if colors.is_empty() {
            vec![self.theme.palette.accent]
        } else {
            colors
        };
        self.particles
            .burst(pos, count, &colors, BurstStyle::default(), &mut self.rng)
    }

    /// Reset per-round state (score value, timers, one-shot flags)
    pub(crate) fn begin_round(&mut self, seed: u64) {
        self.score.reset();
        self.particles.clear();
        self.input.reset();
        self.rng = Pcg32::seed_from_u64(seed);
        self.elapsed = 0.0;
        self.screen_shake = 0.0;
        self.cues.clear();
        self.game_over_requested = false;
        self.level = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GameContext {
        GameContext::new(1, Vec2::new(400.0, 300.0), Theme::builtin().remove(1), 50)
    }

    #[test]
    fn test_shake_decays_and_respects_setting() {
        let mut ctx = ctx();
        ctx.shake(2.0);
        assert_eq!(ctx.screen_shake(), 1.0);
        for _ in 0..60 {
            ctx.decay_shake();
        }
        assert_eq!(ctx.screen_shake(), 0.0);

        ctx.set_shake_enabled(false);
        ctx.shake(0.5);
        assert_eq!(ctx.screen_shake(), 0.0);
    }

    #[test]
    fn test_burst_uses_theme_colors() {
        let mut ctx = ctx();
        assert_eq!(ctx.burst(Vec2::new(10.0, 10.0), 6), 6);
        let palette = ctx.theme.effects.particle_colors.clone();
        assert!(ctx.particles.iter().all(|p| palette.contains(&p.color)));
    }

    #[test]
    fn test_game_over_request_is_one_shot() {
        let mut ctx = ctx();
        ctx.end_game();
        assert!(ctx.take_game_over_request());
        assert!(!ctx.take_game_over_request());
    }
}
