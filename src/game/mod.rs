//! Game lifecycle
//!
//! Concrete games implement [`Game`]; a [`GameHost`] owns one, mounts it on a
//! surface, runs the fixed-timestep loop, keeps score and high scores, and
//! reports lifecycle events for the leaderboard/achievement/share layers.
//!
//! ```text
//!   Unmounted --mount--> Ready --start--> Playing <--pause/resume--> Paused
//!                                           |
//!                                       game_over
//!                                           v
//!                                        GameOver --start/restart--> Playing
//! ```

mod context;
mod host;
pub mod input;
mod score;

pub use context::GameContext;
pub use host::{GameHost, RoundResult};
pub use input::{InputState, Key};
pub use score::Score;

use glam::Vec2;

use crate::surface::Surface;
use crate::theme::Theme;

/// Static description of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameInfo {
    /// Stable id, used as the storage key prefix
    pub id: &'static str,
    pub title: &'static str,
}

/// Hooks a concrete game implements
pub trait Game {
    fn info(&self) -> GameInfo;

    /// One-time setup when mounted (build static data, size to the surface)
    fn setup(&mut self, _ctx: &mut GameContext) {}

    /// Reset game state for a new round
    fn initialize(&mut self, ctx: &mut GameContext);

    /// Advance one fixed step while playing
    fn update(&mut self, ctx: &mut GameContext, dt: f32);

    /// Draw the current state (particles and overlays are drawn by the host)
    fn draw(&self, surface: &mut dyn Surface, ctx: &GameContext);

    /// Release resources when unmounted
    fn cleanup(&mut self, _ctx: &mut GameContext) {}

    fn on_theme_changed(&mut self, _theme: &Theme) {}

    fn on_resize(&mut self, _size: Vec2) {}
}

/// Where a mounted game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Unmounted,
    /// Mounted, waiting for the first start
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Feedback cues raised by games (sound, haptics)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Collect,
    PowerUp,
    PowerDown,
    Hit,
    Move,
}

/// Notifications for collaborators outside the game
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Mounted,
    Started,
    Paused,
    Resumed,
    ScoreChanged { score: u64 },
    /// Score crossed a multiple of the configured milestone step
    Milestone { score: u64 },
    /// First time this round beat the stored best
    NewBest { score: u64 },
    Cue(Cue),
    GameOver {
        score: u64,
        best: u64,
        /// High score rank (1-based) if the score made the list
        rank: Option<usize>,
    },
    Unmounted,
}

/// Modal UI drawn on top of the game
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Start,
    Paused,
    GameOver {
        score: u64,
        best: u64,
        rank: Option<usize>,
        new_best: bool,
    },
}

impl Overlay {
    /// Heading and body lines
    pub fn lines(&self, title: &str) -> (String, Vec<String>) {
        match self {
            Overlay::Start => (
                title.to_string(),
                vec!["Press Space or tap to start".to_string()],
            ),
            Overlay::Paused => (
                "Paused".to_string(),
                vec!["Press Esc or tap to resume".to_string()],
            ),
            Overlay::GameOver {
                score,
                best,
                rank,
                new_best,
            } => {
                let mut body = vec![format!("Score: {score}"), format!("Best: {best}")];
                if *new_best {
                    body.push("New best!".to_string());
                } else if let Some(rank) = rank {
                    body.push(format!("#{rank} on your high scores"));
                }
                body.push("Press Space or tap to play again".to_string());
                ("Game Over".to_string(), body)
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, theme: &Theme, title: &str) {
        use crate::geometry::Rect;
        use crate::surface::TextAlign;

        let size = surface.size();
        surface.fill_rect(
            Rect::new(0.0, 0.0, size.x, size.y),
            theme.palette.background.with_alpha(0.75),
        );
        let (heading, body) = self.lines(title);
        let center = size / 2.0;
        let heading_y = center.y - 20.0 * body.len() as f32;
        surface.text(
            &heading,
            Vec2::new(center.x, heading_y),
            36.0,
            theme.palette.primary,
            TextAlign::Center,
        );
        for (i, line) in body.iter().enumerate() {
            surface.text(
                line,
                Vec2::new(center.x, heading_y + 44.0 + 26.0 * i as f32),
                18.0,
                theme.palette.text,
                TextAlign::Center,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_overlay_lines() {
        let overlay = Overlay::GameOver {
            score: 120,
            best: 120,
            rank: Some(1),
            new_best: true,
        };
        let (heading, body) = overlay.lines("Orb Runner");
        assert_eq!(heading, "Game Over");
        assert_eq!(body[0], "Score: 120");
        assert!(body.contains(&"New best!".to_string()));

        let overlay = Overlay::GameOver {
            score: 40,
            best: 120,
            rank: Some(3),
            new_best: false,
        };
        let (_, body) = overlay.lines("Orb Runner");
        assert!(body.contains(&"#3 on your high scores".to_string()));
    }

    #[test]
    fn test_start_overlay_uses_title() {
        let (heading, _) = Overlay::Start.lines("Snake");
        assert_eq!(heading, "Snake");
    }
}
