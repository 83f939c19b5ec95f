//! Timed power-up effects

/// Outcome of `activate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Effect was not running
    Started,
    /// Effect was running; its timer restarted
    Refreshed,
}

/// A running effect
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePowerUp<K> {
    pub kind: K,
    /// Seconds left
    pub remaining: f32,
    /// Seconds the current activation lasts in total
    pub duration: f32,
}

/// Tracks which power-ups are active and for how long
///
/// `K` is the game's own power-up enum. Effects are kept in activation order
/// so expiry is reported deterministically.
#[derive(Debug, Clone)]
pub struct PowerUpManager<K> {
    active: Vec<ActivePowerUp<K>>,
}

impl<K> Default for PowerUpManager<K> {
    fn default() -> Self {
        Self { active: Vec::new() }
    }
}

impl<K: Copy + PartialEq> PowerUpManager<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_mut(&mut self, kind: K) -> Option<&mut ActivePowerUp<K>> {
        self.active.iter_mut().find(|p| p.kind == kind)
    }

    fn find(&self, kind: K) -> Option<&ActivePowerUp<K>> {
        self.active.iter().find(|p| p.kind == kind)
    }

    /// Start an effect, or restart its timer if already running
    pub fn activate(&mut self, kind: K, duration: f32) -> Activation {
        let duration = duration.max(0.0);
        if let Some(p) = self.find_mut(kind) {
            p.remaining = duration;
            p.duration = duration;
            return Activation::Refreshed;
        }
        self.active.push(ActivePowerUp {
            kind,
            remaining: duration,
            duration,
        });
        Activation::Started
    }

    /// Add time to a running effect; false if it isn't running
    pub fn extend(&mut self, kind: K, seconds: f32) -> bool {
        match self.find_mut(kind) {
            Some(p) => {
                p.remaining += seconds.max(0.0);
                p.duration = p.duration.max(p.remaining);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, kind: K) -> bool {
        self.find(kind).is_some()
    }

    pub fn remaining(&self, kind: K) -> Option<f32> {
        self.find(kind).map(|p| p.remaining)
    }

    /// Fraction of the effect left (1.0 fresh, 0.0 inactive), for HUD bars
    pub fn progress(&self, kind: K) -> f32 {
        match self.find(kind) {
            Some(p) if p.duration > 0.0 => (p.remaining / p.duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// End an effect early (e.g. a shield absorbing a hit)
    pub fn deactivate(&mut self, kind: K) -> bool {
        let before = self.active.len();
        self.active.retain(|p| p.kind != kind);
        self.active.len() != before
    }

    /// Count timers down; returns the effects that ran out, in activation order
    pub fn update(&mut self, dt: f32) -> Vec<K> {
        let mut expired = Vec::new();
        for p in self.active.iter_mut() {
            p.remaining -= dt;
            if p.remaining <= 0.0 {
                expired.push(p.kind);
            }
        }
        self.active.retain(|p| p.remaining > 0.0);
        expired
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivePowerUp<K>> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Shield,
        Magnet,
        Slow,
    }

    #[test]
    fn test_activate_and_refresh() {
        let mut powerups = PowerUpManager::new();
        assert_eq!(powerups.activate(Kind::Shield, 5.0), Activation::Started);
        powerups.update(3.0);
        assert_eq!(powerups.remaining(Kind::Shield), Some(2.0));
        assert_eq!(powerups.activate(Kind::Shield, 5.0), Activation::Refreshed);
        assert_eq!(powerups.remaining(Kind::Shield), Some(5.0));
        assert_eq!(powerups.len(), 1);
    }

    #[test]
    fn test_expiry_order() {
        let mut powerups = PowerUpManager::new();
        powerups.activate(Kind::Slow, 1.0);
        powerups.activate(Kind::Magnet, 1.0);
        powerups.activate(Kind::Shield, 10.0);

        assert!(powerups.update(0.5).is_empty());
        assert_eq!(powerups.update(0.5), vec![Kind::Slow, Kind::Magnet]);
        assert!(powerups.is_active(Kind::Shield));
        assert!(!powerups.is_active(Kind::Magnet));
    }

    #[test]
    fn test_progress_extend_deactivate() {
        let mut powerups = PowerUpManager::new();
        assert_eq!(powerups.progress(Kind::Magnet), 0.0);
        assert!(!powerups.extend(Kind::Magnet, 2.0));

        powerups.activate(Kind::Magnet, 4.0);
        powerups.update(1.0);
        assert!((powerups.progress(Kind::Magnet) - 0.75).abs() < 1e-6);

        assert!(powerups.extend(Kind::Magnet, 3.0));
        assert_eq!(powerups.remaining(Kind::Magnet), Some(6.0));
        assert_eq!(powerups.progress(Kind::Magnet), 1.0);

        assert!(powerups.deactivate(Kind::Magnet));
        assert!(!powerups.deactivate(Kind::Magnet));
    }

    #[test]
    fn test_zero_duration_expires_next_update() {
        let mut powerups = PowerUpManager::new();
        powerups.activate(Kind::Slow, 0.0);
        assert_eq!(powerups.update(0.016), vec![Kind::Slow]);
    }

    proptest! {
        #[test]
        fn remaining_never_increases_under_update(
            duration in 0.1f32..30.0,
            steps in proptest::collection::vec(0.0f32..0.5, 1..50),
        ) {
            let mut powerups = PowerUpManager::new();
            powerups.activate(Kind::Shield, duration);
            let mut last = duration;
            for dt in steps {
                powerups.update(dt);
                match powerups.remaining(Kind::Shield) {
                    Some(r) => {
                        prop_assert!(r <= last);
                        prop_assert!(r > 0.0);
                        last = r;
                    }
                    None => break,
                }
            }
        }
    }
}
