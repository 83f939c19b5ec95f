//! Arcade Kit - shared infrastructure for browser mini-games
//!
//! Core modules:
//! - `game`: Lifecycle host (mount, fixed-timestep loop, scoring, overlays, hooks)
//! - `theme`: Named color/effect palettes with change notification
//! - `components`: Reusable gameplay pieces (power-ups, collectibles, obstacles, ...)
//! - `storage`: LocalStorage-style key/value persistence
//! - `surface`: Drawing abstraction over a 2D canvas
//! - `audio`: Procedural sound cues (Web Audio on wasm32)
//! - `demo`: Orb Runner, a sample game using every component

pub mod audio;
pub mod components;
pub mod demo;
pub mod game;
pub mod geometry;
pub mod highscores;
pub mod settings;
pub mod storage;
pub mod surface;
pub mod theme;

pub use game::{Game, GameContext, GameHost, GameInfo, GamePhase, LifecycleEvent};
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use storage::{KeyValueStore, MemoryStore};
pub use theme::{Color, Theme, ThemeManager};

/// Framework configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame we are willing to simulate (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Frames averaged for the FPS readout
    pub const FPS_WINDOW: usize = 60;

    /// Screen shake decay per fixed step
    pub const SHAKE_DECAY: f32 = 0.9;
    /// Maximum shake displacement in pixels at intensity 1.0
    pub const SHAKE_PIXELS: f32 = 8.0;

    /// LocalStorage keys
    pub const SETTINGS_KEY: &str = "arcade_settings";
    pub const THEME_KEY: &str = "arcade_theme";
    pub const HIGHSCORES_SUFFIX: &str = "_highscores";
}
