//! Theming: named color/effect palettes shared by every game
//!
//! A `Theme` is plain data (JSON-loadable); the `ThemeManager` owns the
//! registry, the current selection, and change subscribers.

mod color;
mod manager;

pub use color::Color;
pub use manager::{SubscriptionId, ThemeManager};

use serde::{Deserialize, Serialize};

/// Named theme colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub grid: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub success: Color,
    pub danger: Color,
    pub warning: Color,
}

/// Visual effect parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    /// Glow/shadow blur radius in pixels (0 = flat)
    pub glow: f32,
    /// Colors picked at random for particle bursts
    pub particle_colors: Vec<Color>,
    /// Drop shadow color under game pieces
    pub shadow: Color,
    /// Rounding applied to tiles and panels
    pub corner_radius: f32,
}

/// A complete theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Registry key (lowercase, stable across releases)
    pub name: String,
    /// Display name for menus
    pub label: String,
    pub palette: Palette,
    pub effects: Effects,
}

impl Theme {
    /// Parse a theme definition from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let theme: Theme = serde_json::from_str(json)?;
        if theme.name.trim().is_empty() {
            anyhow::bail!("theme name must not be empty");
        }
        Ok(theme)
    }

    /// Particle color for the `i`th particle of a burst
    pub fn particle_color(&self, i: usize) -> Color {
        match self.effects.particle_colors.len() {
            0 => self.palette.accent,
            n => self.effects.particle_colors[i % n],
        }
    }

    /// Name of the theme selected when nothing is persisted
    pub const DEFAULT_NAME: &'static str = "classic";

    /// Themes that ship with the framework, in menu order
    pub fn builtin() -> Vec<Theme> {
        vec![
            Self::classic(),
            Self::neon(),
            Self::retro(),
            Self::ocean(),
            Self::sunset(),
        ]
    }

    fn classic() -> Self {
        Self {
            name: "classic".into(),
            label: "Classic".into(),
            palette: Palette {
                background: Color::rgb(0xfa, 0xf8, 0xef),
                surface: Color::rgb(0xbb, 0xad, 0xa0),
                grid: Color::rgb(0xcd, 0xc1, 0xb4),
                primary: Color::rgb(0x4c, 0xaf, 0x50),
                secondary: Color::rgb(0x21, 0x96, 0xf3),
                accent: Color::rgb(0xff, 0xc1, 0x07),
                text: Color::rgb(0x77, 0x6e, 0x65),
                text_muted: Color::rgb(0xa0, 0x98, 0x8e),
                success: Color::rgb(0x4c, 0xaf, 0x50),
                danger: Color::rgb(0xf4, 0x43, 0x36),
                warning: Color::rgb(0xff, 0x98, 0x00),
            },
            effects: Effects {
                glow: 0.0,
                particle_colors: vec![
                    Color::rgb(0xff, 0xc1, 0x07),
                    Color::rgb(0x4c, 0xaf, 0x50),
                    Color::rgb(0x21, 0x96, 0xf3),
                ],
                shadow: Color::rgba(0, 0, 0, 0x33),
                corner_radius: 6.0,
            },
        }
    }

    fn neon() -> Self {
        Self {
            name: "neon".into(),
            label: "Neon".into(),
            palette: Palette {
                background: Color::rgb(0x0a, 0x0a, 0x1a),
                surface: Color::rgb(0x14, 0x14, 0x2e),
                grid: Color::rgb(0x22, 0x22, 0x44),
                primary: Color::rgb(0x00, 0xff, 0xc8),
                secondary: Color::rgb(0xff, 0x00, 0xe6),
                accent: Color::rgb(0xff, 0xf7, 0x00),
                text: Color::rgb(0xe0, 0xf7, 0xff),
                text_muted: Color::rgb(0x7a, 0x8b, 0xb0),
                success: Color::rgb(0x39, 0xff, 0x14),
                danger: Color::rgb(0xff, 0x17, 0x44),
                warning: Color::rgb(0xff, 0x91, 0x00),
            },
            effects: Effects {
                glow: 18.0,
                particle_colors: vec![
                    Color::rgb(0x00, 0xff, 0xc8),
                    Color::rgb(0xff, 0x00, 0xe6),
                    Color::rgb(0xff, 0xf7, 0x00),
                ],
                shadow: Color::rgba(0x00, 0xff, 0xc8, 0x66),
                corner_radius: 2.0,
            },
        }
    }

    fn retro() -> Self {
        Self {
            name: "retro".into(),
            label: "Retro".into(),
            palette: Palette {
                background: Color::rgb(0x0f, 0x38, 0x0f),
                surface: Color::rgb(0x30, 0x62, 0x30),
                grid: Color::rgb(0x30, 0x62, 0x30),
                primary: Color::rgb(0x9b, 0xbc, 0x0f),
                secondary: Color::rgb(0x8b, 0xac, 0x0f),
                accent: Color::rgb(0x9b, 0xbc, 0x0f),
                text: Color::rgb(0x9b, 0xbc, 0x0f),
                text_muted: Color::rgb(0x8b, 0xac, 0x0f),
                success: Color::rgb(0x9b, 0xbc, 0x0f),
                danger: Color::rgb(0x8b, 0xac, 0x0f),
                warning: Color::rgb(0x9b, 0xbc, 0x0f),
            },
            effects: Effects {
                glow: 0.0,
                particle_colors: vec![Color::rgb(0x9b, 0xbc, 0x0f), Color::rgb(0x8b, 0xac, 0x0f)],
                shadow: Color::TRANSPARENT,
                corner_radius: 0.0,
            },
        }
    }

    fn ocean() -> Self {
        Self {
            name: "ocean".into(),
            label: "Ocean".into(),
            palette: Palette {
                background: Color::rgb(0x01, 0x2a, 0x4a),
                surface: Color::rgb(0x01, 0x3a, 0x63),
                grid: Color::rgb(0x01, 0x49, 0x7c),
                primary: Color::rgb(0x61, 0xa5, 0xc2),
                secondary: Color::rgb(0x2c, 0x7d, 0xa0),
                accent: Color::rgb(0xa9, 0xd6, 0xe5),
                text: Color::rgb(0xe8, 0xf4, 0xf8),
                text_muted: Color::rgb(0x89, 0xc2, 0xd9),
                success: Color::rgb(0x52, 0xb7, 0x88),
                danger: Color::rgb(0xef, 0x47, 0x6f),
                warning: Color::rgb(0xff, 0xd1, 0x66),
            },
            effects: Effects {
                glow: 8.0,
                particle_colors: vec![
                    Color::rgb(0xa9, 0xd6, 0xe5),
                    Color::rgb(0x61, 0xa5, 0xc2),
                    Color::WHITE,
                ],
                shadow: Color::rgba(0, 0, 0, 0x55),
                corner_radius: 8.0,
            },
        }
    }

    fn sunset() -> Self {
        Self {
            name: "sunset".into(),
            label: "Sunset".into(),
            palette: Palette {
                background: Color::rgb(0x2d, 0x13, 0x2c),
                surface: Color::rgb(0x80, 0x13, 0x36),
                grid: Color::rgb(0x51, 0x0a, 0x32),
                primary: Color::rgb(0xee, 0x45, 0x40),
                secondary: Color::rgb(0xc7, 0x2c, 0x41),
                accent: Color::rgb(0xff, 0xb3, 0x47),
                text: Color::rgb(0xff, 0xe8, 0xd6),
                text_muted: Color::rgb(0xd8, 0xa4, 0x8f),
                success: Color::rgb(0xff, 0xb3, 0x47),
                danger: Color::rgb(0xff, 0x4d, 0x4d),
                warning: Color::rgb(0xff, 0xd9, 0x3d),
            },
            effects: Effects {
                glow: 12.0,
                particle_colors: vec![
                    Color::rgb(0xee, 0x45, 0x40),
                    Color::rgb(0xff, 0xb3, 0x47),
                    Color::rgb(0xff, 0xd9, 0x3d),
                ],
                shadow: Color::rgba(0, 0, 0, 0x44),
                corner_radius: 10.0,
            },
        }
    }
}
