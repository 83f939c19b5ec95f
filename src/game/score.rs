//! Round scoring shared by every game

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Points this round
    pub value: u64,
    /// Best score seen for this game (loaded from high scores)
    pub best: u64,
    /// Applied to every `add` (double-points power-ups)
    multiplier: f32,
    /// Best at the start of the round, to detect a new record
    best_at_start: u64,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Score {
    pub fn new(best: u64) -> Self {
        Self {
            value: 0,
            best,
            multiplier: 1.0,
            best_at_start: best,
        }
    }

    /// Add points (scaled by the multiplier); returns the points awarded
    pub fn add(&mut self, points: u64) -> u64 {
        let awarded = (points as f64 * self.multiplier as f64).round() as u64;
        self.value = self.value.saturating_add(awarded);
        self.best = self.best.max(self.value);
        awarded
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn set_multiplier(&mut self, multiplier: f32) {
        self.multiplier = multiplier.max(0.0);
    }

    /// True once this round beat the best from before it started
    pub fn is_new_best(&self) -> bool {
        self.value > self.best_at_start
    }

    /// Best carried into this round from earlier rounds
    pub fn best_at_round_start(&self) -> u64 {
        self.best_at_start
    }

    /// Start a new round, keeping the best
    pub fn reset(&mut self) {
        self.value = 0;
        self.multiplier = 1.0;
        self.best_at_start = self.best;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_multiplier() {
        let mut score = Score::new(0);
        assert_eq!(score.add(10), 10);
        score.set_multiplier(2.0);
        assert_eq!(score.add(10), 20);
        assert_eq!(score.value, 30);
        assert_eq!(score.best, 30);
    }

    #[test]
    fn test_new_best_detection() {
        let mut score = Score::new(50);
        score.add(50);
        assert!(!score.is_new_best());
        score.add(1);
        assert!(score.is_new_best());
        assert_eq!(score.best, 51);

        score.reset();
        assert_eq!(score.value, 0);
        assert_eq!(score.multiplier(), 1.0);
        score.add(51);
        assert!(!score.is_new_best());
    }
}
