//! Player settings and preferences
//!
//! Shared by every game and persisted separately from scores in LocalStorage.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::storage::{KeyValueStore, load_json, save_json};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Number of parallax layers worth drawing
    pub fn background_layers(&self) -> usize {
        match self {
            QualityPreset::Low => 1,
            QualityPreset::Medium => 2,
            QualityPreset::High => 3,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => anyhow::bail!("unknown quality preset '{other}'"),
        }
    }
}

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle bursts on score, pickups, crashes
    pub particles: bool,
    /// Screen shake on impacts
    pub screen_shake: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Sound toggle from the game menu
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            screen_shake: true,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset trades shake for frame time on weak devices
        if preset == QualityPreset::Low {
            self.screen_shake = false;
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Volume actually sent to the mixer
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json(store, SETTINGS_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Persist settings; failures are logged, not fatal
    pub fn save(&self, store: &dyn KeyValueStore) {
        match save_json(store, SETTINGS_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FailingStore, MemoryStore};

    #[test]
    fn test_preset_parsing() {
        assert_eq!("HIGH".parse::<QualityPreset>().unwrap(), QualityPreset::High);
        assert_eq!("med".parse::<QualityPreset>().unwrap(), QualityPreset::Medium);
        assert!("ultra".parse::<QualityPreset>().is_err());
    }

    #[test]
    fn test_effective_values() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 500);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);

        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());

        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_low_preset_disables_shake() {
        let mut settings = Settings::default();
        settings.apply_preset(QualityPreset::Low);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(!settings.screen_shake);
        assert_eq!(settings.max_particles(), 100);
    }

    #[test]
    fn test_load_save() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let mut settings = Settings::default();
        settings.muted = true;
        settings.quality = QualityPreset::High;
        settings.save(&store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_failing_store_falls_back_to_defaults() {
        assert_eq!(Settings::load(&FailingStore), Settings::default());
        // Logged, not propagated
        Settings::default().save(&FailingStore);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let store = MemoryStore::new();
        store.set(SETTINGS_KEY, r#"{"muted":true}"#).unwrap();
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }
}
